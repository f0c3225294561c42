use tracker_core::{
    update, Effect, Msg, Phase, StatusReply, TaskId, TaskStatus, TrackerState, ViewDescriptor,
};

#[test]
fn stale_reply_cannot_overwrite_newer_result() {
    let mut state = TrackerState::new();
    update(&mut state, Msg::StartOrRefresh("first".to_string())).unwrap();
    update(&mut state, Msg::StartOrRefresh("second".to_string())).unwrap();

    // Newer reply lands first.
    let fresh = update(
        &mut state,
        Msg::StatusResolved {
            generation: 2,
            result: Ok(StatusReply::Rejected {
                message: "bad id".to_string(),
            }),
        },
    )
    .unwrap();
    assert_eq!(
        fresh,
        vec![Effect::Render(ViewDescriptor::Error {
            message: "bad id".to_string(),
        })]
    );

    // The slow, superseded reply is dropped.
    let stale = update(
        &mut state,
        Msg::StatusResolved {
            generation: 1,
            result: Ok(StatusReply::Status(TaskStatus::Done)),
        },
    )
    .unwrap();
    assert!(stale.is_empty());
    assert_eq!(state.snapshot().phase, Phase::Terminal);
    assert_eq!(
        state.snapshot().active_task_id,
        Some(TaskId::parse("second").unwrap())
    );
}

#[test]
fn stale_reply_arriving_before_fresh_one_is_ignored() {
    let mut state = TrackerState::new();
    update(&mut state, Msg::StartOrRefresh("abc".to_string())).unwrap();
    update(&mut state, Msg::CheckAgain).unwrap();

    let stale = update(
        &mut state,
        Msg::StatusResolved {
            generation: 1,
            result: Ok(StatusReply::Status(TaskStatus::Pending)),
        },
    )
    .unwrap();
    assert!(stale.is_empty());
    assert!(state.snapshot().in_flight);
    assert!(!state.snapshot().timer_pending);

    let fresh = update(
        &mut state,
        Msg::StatusResolved {
            generation: 2,
            result: Ok(StatusReply::Status(TaskStatus::Done)),
        },
    )
    .unwrap();
    assert_eq!(fresh.len(), 1);
    assert!(!state.snapshot().in_flight);
}

#[test]
fn duplicate_reply_for_same_generation_is_ignored() {
    let mut state = TrackerState::new();
    update(&mut state, Msg::StartOrRefresh("abc".to_string())).unwrap();
    let done = Msg::StatusResolved {
        generation: 1,
        result: Ok(StatusReply::Status(TaskStatus::Done)),
    };

    assert_eq!(update(&mut state, done.clone()).unwrap().len(), 1);
    assert!(update(&mut state, done).unwrap().is_empty());
}
