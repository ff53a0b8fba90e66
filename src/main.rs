use checksheet::cli::commands;
use checksheet::cli::{Cli, Commands};
use checksheet::core::logging::init_logging;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(global.verbose, global.quiet);

    match cli.command {
        Commands::New(args) => commands::new::run(args, &global),
        Commands::Collect(args) => commands::collect::run(args, &global),
        Commands::Validate(args) => commands::validate::run(args, &global),
        Commands::Report(args) => commands::report::run(args, &global),
        Commands::Export(args) => commands::export::run(args, &global),
        Commands::Schema(args) => commands::schema::run(args, &global),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
