use anyhow::Result;

use vidsweep_core::{
    mail::HttpMailRelay,
    run_sweep,
    storage::{Database, PageRepository},
    video::HttpVideoProvider,
    AppConfig, SweepOptions,
};

pub async fn run(db: &Database, config: &AppConfig, test: bool) -> Result<()> {
    if test {
        println!("Notice: running in test mode, nothing will be removed.\n");
    }

    println!("Sweeping video pages for dead embedded videos...");

    let store = PageRepository::new(db);
    let provider = HttpVideoProvider::new(db.clone(), config)?;
    let mailer = HttpMailRelay::new(&config.mail)?;
    let options = SweepOptions {
        dry_run: test,
        day_of_year: None,
    };

    let report = run_sweep(&store, &provider, &mailer, config, &options).await?;

    println!(
        "Checked {} of {} video pages (offset {}).",
        report.checked, report.total_pages, report.offset
    );

    if report.missing_embed > 0 {
        println!(
            "{} pages had no provider link and were skipped.",
            report.missing_embed
        );
    }

    if report.dry_run {
        println!(
            "{} videos are unavailable and would be removed.",
            report.unavailable
        );
    } else if report.removed > 0 {
        println!("Removed {} video pages.", report.removed);
    } else {
        println!("No videos to remove.");
    }

    if report.skipped_over_cap > 0 {
        println!(
            "{} unavailable videos were left for a later run (limit {} per run).",
            report.skipped_over_cap, config.sweep.max_remove_videos
        );
    }

    if report.alerts_sent > 0 || report.alerts_failed > 0 {
        println!(
            "Alert mail: {} sent, {} failed.",
            report.alerts_sent, report.alerts_failed
        );
    }

    Ok(())
}
