//! Config commands

use moracat_pricing::EngineConfig;

use crate::ConfigCommands;
use super::Context;

pub fn handle(ctx: &Context, action: ConfigCommands) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => {
            let config = ctx.engine.config();
            let source = ctx
                .engine_source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in defaults)".into());

            let body = render(config, &source)?;
            ctx.format.print(config, || body)
        }
    }
}

fn render(config: &EngineConfig, source: &str) -> anyhow::Result<String> {
    let body = toml::to_string_pretty(config)?;
    Ok(format!("# source: {}\n{}", source, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let out = render(&EngineConfig::default(), "(built-in defaults)").unwrap();
        assert!(out.starts_with("# source: (built-in defaults)\n"));
        assert!(out.contains("margin_floor_percent"));

        let parsed: EngineConfig = toml::from_str(out.split_once('\n').unwrap().1).unwrap();
        assert_eq!(parsed.margin_floor_percent, EngineConfig::default().margin_floor_percent);
    }
}
