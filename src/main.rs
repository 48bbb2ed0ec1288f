use anyhow::Result;
use a11y_report::cli::{self, Commands, GenerateOptions};
use a11y_report::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = cli::parse_args();
    init_tracing(cli.command.verbosity());

    match cli.command {
        Commands::Generate {
            pages,
            runs,
            run_id,
            format,
            output,
            config,
            verbosity: _,
        } => cli::handle_generate_command(GenerateOptions {
            pages,
            runs,
            run_ids: run_id,
            format,
            output,
            config,
        }),
        Commands::Schema { pages, verbosity: _ } => cli::handle_schema_command(&pages),
    }
}
