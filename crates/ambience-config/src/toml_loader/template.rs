//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Ambience Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[theme]
# default_mode = "auto"       # light | dark | auto
# fallback_hue = 250          # 0-359, used when the page carries no hue
# hue_policy = "preserve"     # preserve | wrap | clamp
# code_theme = "github-dark"

[background]
# base_path = "/"
# default_blur = 8            # pixels
# fade_in_delay_ms = 50       # 0-2000
#
# [[background.options]]
# src = "/background/1.webp"
# type = "image"              # image | video
# label = "Optional label"

[rainbow]
# interval_ms = 45            # 10-1000

[storage]
# path = "/path/to/preferences.json"

[logging]
# level = "info"              # trace | debug | info | warn | error
"##
    .to_string()
}
