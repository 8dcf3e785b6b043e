//! Java `.properties` writer.

use std::collections::BTreeMap;

/// Convierte el mapa de configuracion a lineas `key=value`.
///
/// Escaping follows the Java `Properties.store(Writer, ...)` conventions:
/// backslash, separators (`=`, `:`), comment markers (`#`, `!`) and
/// tab/newline/CR/formfeed are backslash-escaped; spaces are escaped
/// everywhere in keys but only when leading in values.
pub fn to_string(configurations: &BTreeMap<String, String>) -> String {
    let mut output = String::new();

    for (key, value) in configurations {
        write_escaped(&mut output, key, true);
        output.push('=');
        write_escaped(&mut output, value, false);
        output.push('\n');
    }

    output
}

fn write_escaped(output: &mut String, input: &str, escape_space: bool) {
    for (position, ch) in input.chars().enumerate() {
        match ch {
            ' ' if escape_space || position == 0 => output.push_str("\\ "),
            ' ' => output.push(' '),
            '\\' => output.push_str("\\\\"),
            '\t' => output.push_str("\\t"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\u{c}' => output.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                output.push('\\');
                output.push(ch);
            }
            _ => output.push(ch),
        }
    }
}
