use super::{CommandSpec, ParamType, Registry};

pub const HELP_HEADER: &str =
    "Arguments surrounded by '<>' are required but arguments surrounded by '||' are optional\nCommands:";

/// Renders parameter labels; the first `min_args` slots are `<required>`,
/// the rest `|optional|`.
pub fn format_params(params: &[ParamType], min_args: usize) -> String {
    params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            if index < min_args {
                format!("<{param}>")
            } else {
                format!("|{param}|")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn command_usage<S>(name: &str, spec: &CommandSpec<S>) -> String {
    let alias = spec
        .alias
        .as_deref()
        .map(|alias| format!("{alias} | "))
        .unwrap_or_default();
    let params = format_params(&spec.params, spec.min_args);
    let usage = format!("{name} {params}");

    format!(
        "{alias}{name}: {}\n\tUsage: {}",
        spec.description,
        usage.trim_end()
    )
}

pub fn help_overview<S>(registry: &Registry<S>) -> String {
    let mut buffer = String::from(HELP_HEADER);
    for (name, spec) in registry.commands() {
        buffer.push('\n');
        buffer.push_str(&command_usage(name, spec));
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Context;
    use crate::error::Result;

    fn noop(_ctx: &mut Context<'_, ()>) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_format_params_required_and_optional() {
        let rendered = format_params(&[ParamType::String, ParamType::Int, ParamType::Bool], 1);
        assert_eq!(rendered, "<string> |integer| |true|false|");
    }

    #[test]
    fn test_format_params_array() {
        assert_eq!(format_params(&[ParamType::Array], 0), "|string...|");
    }

    #[test]
    fn test_command_usage_with_alias() {
        let spec = CommandSpec::new(noop)
            .alias("af")
            .description("Adds a file")
            .min_args(1)
            .params([ParamType::String]);
        assert_eq!(
            command_usage("add_file", &spec),
            "af | add_file: Adds a file\n\tUsage: add_file <string>"
        );
    }

    #[test]
    fn test_command_usage_without_params() {
        let spec = CommandSpec::new(noop).description("quits");
        assert_eq!(command_usage("quit", &spec), "quit: quits\n\tUsage: quit");
    }
}
