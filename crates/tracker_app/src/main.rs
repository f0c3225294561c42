mod platform;

use clap::Parser;

use platform::app::RunOptions;
use platform::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log_destination(), cli.log_level());
    let config = cli.resolve_config()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(platform::app::run(RunOptions {
        task_id: cli.task_id.clone(),
        watch: cli.watch,
        config,
    }));
    // A pending stdin read would otherwise keep the runtime alive.
    runtime.shutdown_background();
    result
}
