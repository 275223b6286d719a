use crate::core::{
    archive::ZipArchiver,
    config::Config,
    download::HttpFetcher,
    installer::{InstallOptions, InstallRequest, Installer},
    progress::{ConsoleProgress, DownloadProgress, NoProgress},
    version::{VersionSelector, DEFAULT_SELECTOR},
};
use crate::error::Result;
use dialoguer::Select;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct InstallFlags {
    pub reuse_download: bool,
    pub no_progress: bool,
    pub interactive: bool,
}

pub fn install_distribution(
    directory: &str,
    version: Option<&str>,
    flags: InstallFlags,
) -> Result<()> {
    // Reject unknown versions before touching the disk or the network
    let selector = match version {
        Some(v) => v.parse::<VersionSelector>()?,
        None if flags.interactive => prompt_for_version()?,
        None => DEFAULT_SELECTOR,
    };

    let config = Config::load()?;
    let request = InstallRequest::new(Path::new(directory), selector)?;

    let installer = Installer::new(
        HttpFetcher::new(&config)?,
        ZipArchiver::new(),
        config.download_base_url.clone(),
    )
    .with_options(InstallOptions {
        reuse_download: flags.reuse_download,
    });

    let resolved = installer.resolve(selector);
    println!("Downloading PrestaShop {}...", resolved.version);
    println!("   Source: {}", resolved.url);

    let mut progress: Box<dyn DownloadProgress> = if flags.no_progress || !config.progress {
        Box::new(NoProgress)
    } else {
        Box::new(ConsoleProgress::new())
    };

    let installation = installer.install(&request, progress.as_mut())?;

    println!();
    println!(
        "✅ PrestaShop {} is now installed at {}",
        installation.version,
        installation.path.display()
    );

    Ok(())
}

fn prompt_for_version() -> Result<VersionSelector> {
    let items: Vec<String> = VersionSelector::ALL
        .iter()
        .map(|selector| format!("{} ({})", selector, selector.release()))
        .collect();
    let default = VersionSelector::ALL
        .iter()
        .position(|selector| *selector == DEFAULT_SELECTOR)
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("What version do you want to install?")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(VersionSelector::ALL[choice])
}
