/// タイムレポートの使用例
///
/// 環境変数の接続設定で、直近7日間の作業ログをコンソールに出力します
///
/// 実行前に環境変数を設定してください：
/// export JIRA_URL=https://your-instance.atlassian.net
/// export JIRA_USER=your-email@example.com
/// export JIRA_API_TOKEN=your-api-token
/// export JIRA_PROJECT=MYB
///
/// 実行方法：
/// cargo run --example time_report_example

use chrono::{Days, Local};
use dotenv::dotenv;
use jira_time_report::{
    JiraConfig, JiraClient, OutputFormat, OutputTarget, ReportPeriod, TimeReportRequest, build_rows,
    collect, format_duration, run,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    println!("[INFO] JIRA タイムレポートの使用例");
    println!("==================================");

    // 設定をロード
    let config = JiraConfig::from_env()
        .map_err(|_| "環境変数が設定されていません。JIRA_URL / JIRA_USER / JIRA_API_TOKEN を設定してください。")?;
    let project = std::env::var("JIRA_PROJECT").unwrap_or_else(|_| "MYB".to_string());

    let today = Local::now().date_naive();
    let from = today.checked_sub_days(Days::new(7)).ok_or("開始日を計算できません")?;
    let period = ReportPeriod::new(from, Some(today))?;
    println!("[OK] 対象期間: {}", period.to_jql_condition());

    // 1. 取得だけを行い、作成者ごとの合計を表示
    println!("\n[1] 作成者ごとの作業時間");
    let client = JiraClient::new(config.clone())?;
    let (work_logs, issues) = collect(&client, &project, &period).await?;
    let rows = build_rows(&issues, &work_logs)?;

    // 行は作成者順に並んでいるので、連続する同じ作成者をまとめる
    let mut totals: Vec<(&str, i64)> = Vec::new();
    for row in &rows {
        let author = row.work_log.author.as_str();
        if let Some(last) = totals.last_mut().filter(|(name, _)| *name == author) {
            last.1 += row.work_log.time_spent;
            continue;
        }
        totals.push((author, row.work_log.time_spent));
    }
    for (author, seconds) in &totals {
        println!("    - {}: {}", author, format_duration(*seconds));
    }

    // 2. 通常のレポート出力
    println!("\n[2] コンソール出力");
    let request = TimeReportRequest {
        config,
        project,
        period,
        format: OutputFormat::Console,
        output: OutputTarget::default(),
    };
    let summary = run(&request, std::io::stdout()).await?;

    println!(
        "\n[OK] 課題 {} 件、作業ログ {} 件、合計 {}",
        summary.issue_count,
        summary.work_log_count,
        format_duration(summary.total_seconds)
    );

    Ok(())
}
