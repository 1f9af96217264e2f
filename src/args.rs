use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "shader-kit", about = "Renders a fragment shader over the whole window")]
pub struct Args {
    /// Log GL details and uniform resolution at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_raises_filter() {
        let args = Args::try_parse_from(["shader-kit"]).unwrap();
        assert_eq!(args.default_log_filter(), "info");

        let args = Args::try_parse_from(["shader-kit", "-v"]).unwrap();
        assert_eq!(args.default_log_filter(), "debug");
    }

    #[test]
    fn window_and_paths_are_not_flags() {
        assert!(Args::try_parse_from(["shader-kit", "--width", "800"]).is_err());
        assert!(Args::try_parse_from(["shader-kit", "other.frag"]).is_err());
    }
}
