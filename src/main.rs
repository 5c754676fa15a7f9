use anyhow::Context;
use clap::Parser;
use electron_scaffold::core::scaffold::{SCRIPT_DEV, SCRIPT_START};
use electron_scaffold::domain::model::{PackageManager, ScaffoldReport, TemplateKind};
use electron_scaffold::utils::{logger, validation::Validate};
use electron_scaffold::{CliConfig, CommandInstaller, Scaffolder, ScaffoldError, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting electron-scaffold");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    let package_manager = settings.package_manager;
    let template = settings.template;
    let installer = CommandInstaller::new(settings.package_manager, settings.install_timeout_secs);
    let scaffolder = Scaffolder::new(installer, settings);

    match scaffolder.run().await {
        Ok(report) => {
            print_summary(&report, package_manager, template).context("failed to write summary")?;
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

fn load_settings(cli: &CliConfig) -> electron_scaffold::Result<Settings> {
    let file = cli.load_file_config()?;
    file.validate()?;

    let settings = Settings::from_cli(cli, file);
    settings.validate()?;
    Ok(settings)
}

fn fail(e: &ScaffoldError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn print_summary(
    report: &ScaffoldReport,
    package_manager: PackageManager,
    template: TemplateKind,
) -> std::io::Result<()> {
    use std::io::Write;

    let mut out = std::io::stdout().lock();
    let profile = &report.profile;

    if report.dry_run {
        writeln!(out, "🔍 Dry run summary:")?;
        writeln!(out, "  Framework: {}", profile.framework)?;
        writeln!(out, "  Dev server: {}", profile.dev_url())?;
        writeln!(out, "  Build output: {}", profile.build_output)?;
        writeln!(out, "  Packages: {}", report.packages_installed.join(", "))?;
        writeln!(out, "  Scripts: {}", report.scripts_added.join(", "))?;
        for path in &report.files_written {
            writeln!(out, "  Would write: {}", path.display())?;
        }
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "🎉 Electron setup complete! Available commands:")?;
    writeln!(
        out,
        "  - Dev mode (hot reload): {}",
        package_manager.run_script(SCRIPT_DEV)
    )?;
    writeln!(
        out,
        "  - Start Electron directly: {}",
        package_manager.run_script(SCRIPT_START)
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Note: dev mode starts your web server ({}) and Electron together.",
        profile.dev_url()
    )?;
    if template == TemplateKind::Tray {
        writeln!(out, "Add a tray icon at electron/img/logo.png before starting.")?;
    }
    for path in &report.files_written {
        writeln!(out, "  📄 {}", path.display())?;
    }
    writeln!(out)?;
    writeln!(out, "✨ All done!")?;
    Ok(())
}
