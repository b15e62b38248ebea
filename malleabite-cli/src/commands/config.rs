use anyhow::Result;
use malleabite_core::config::LayoutConfig;
use owo_colors::OwoColorize;

pub fn run(init: bool) -> Result<()> {
    let config_path = LayoutConfig::config_path()?;

    if init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            LayoutConfig::create_default_config(&config_path)?;
            println!("Created {}", config_path.display().green());
        }
        return Ok(());
    }

    let config = LayoutConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("{}", "Settings".bold());
    println!(
        "  Time zone:  {}",
        config.timezone.as_deref().unwrap_or("(system)")
    );

    Ok(())
}
