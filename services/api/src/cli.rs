use crate::demo::{run_assess, run_demo, run_reference, AssessArgs, ReferenceCommand};
use crate::server;
use clap::{Args, Parser, Subcommand};
use visa_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Student Visa Eligibility Assessor",
    about = "Score student visa questionnaires from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a questionnaire draft or a CSV export of questionnaires
    Assess(AssessArgs),
    /// Print the country, program or study field catalogue
    Reference {
        #[command(subcommand)]
        command: ReferenceCommand,
    },
    /// Score a built-in sample applicant and print the report
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Reference { command } => run_reference(command),
        Command::Demo => run_demo(),
    }
}
