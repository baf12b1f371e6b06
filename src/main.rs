use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use jira_time_report::report::{DEFAULT_CSV_FILE_NAME, DEFAULT_EXCEL_FILE_NAME};
use jira_time_report::{
    Auth, JiraConfig, OutputFormat, OutputTarget, ReportPeriod, Result, TimeReportRequest,
};

#[derive(Parser)]
#[command(name = "jira-time-report", version, about = "Generate a Jira time report.")]
struct Cli {
    /// The Jira URL
    jira_url: String,

    /// The user name to use for connecting to Jira
    user_name: String,

    /// The API token to use for connecting to Jira
    api_token: String,

    /// The Jira project to retrieve the time report
    project: String,

    /// The date to start the time report, format yyyy-mm-dd
    from_date: String,

    /// The date to end the time report (the end date is inclusive), format yyyy-mm-dd.
    /// Defaults to today. A to date before the from date is rejected
    #[arg(long, alias = "to_date")]
    to_date: Option<String>,

    /// The output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    output: OutputFormat,

    /// The location of the SSL certificate, needed in case of self-signed certificates
    #[arg(long, alias = "ssl_certificate", env = "JIRA_SSL_CERTIFICATE")]
    ssl_certificate: Option<PathBuf>,

    /// The file to write when the output format is csv
    #[arg(long, default_value = DEFAULT_CSV_FILE_NAME)]
    csv_file: PathBuf,

    /// The file to write when the output format is excel
    #[arg(long, default_value = DEFAULT_EXCEL_FILE_NAME)]
    excel_file: PathBuf,
}

impl Cli {
    fn into_request(self) -> Result<TimeReportRequest> {
        let auth = Auth::Basic {
            username: self.user_name,
            api_token: self.api_token,
        };
        let mut config = JiraConfig::new(self.jira_url, auth)?;
        if let Some(path) = self.ssl_certificate {
            config = config.ssl_certificate(path);
        }

        Ok(TimeReportRequest {
            config,
            project: self.project,
            period: ReportPeriod::parse(&self.from_date, self.to_date.as_deref())?,
            format: self.output,
            output: OutputTarget {
                csv_path: self.csv_file,
                excel_path: self.excel_file,
            },
        })
    }
}

// 標準出力はレポート用なのでログは標準エラーに出す
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    setup_logging();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let request = cli.into_request()?;
    jira_time_report::run(&request, std::io::stdout()).await?;
    Ok(())
}
