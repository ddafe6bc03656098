/// Parse `"a,b"` into a pair, as used for window centres on the command line
pub fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String>
where
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let v = s.split(',').collect::<Vec<_>>();
    if v.len() != 2 {
        return Err(format!("expected two comma-separated values, found `{s}`"));
    }
    let parse = |t: &str| t.trim().parse::<T>().map_err(|e| format!("`{t}`: {e}"));
    Ok((parse(v[0])?, parse(v[1])?))
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}


pub mod timing {

    use super::group_digits;
    use std::time::Instant;

    /// Logs how long each stage of a run takes
    pub struct Progress {
        previous: Instant,
        stage: String,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now(), stage: String::new() } }

        /// Log message with trailing ellipsis, start timer.
        pub fn start(&mut self, message: &str) {
            log::info!("{message} ...");
            self.stage = message.to_string();
            self.start_timer();
        }

        // Log time elapsed since last start or done
        pub fn done(&mut self) {
            log::info!("{} done: {} ms", self.stage, group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}

#[cfg(test)]
mod test_parse {
    use super::*;
    use rstest::rstest;

    #[rstest(/**/ input     , expected,
             case("9,1"     , Ok((9.0, 1.0))),
             case("-24, 0"  , Ok((-24.0, 0.0))),
             case(" 2.5 ,-3", Ok((2.5, -3.0))),
    )]
    fn good_pairs(input: &str, expected: Result<(f64, f64), String>) {
        assert_eq!(parse_pair::<f64>(input), expected);
    }

    #[rstest(/**/ input,
             case("9"),
             case("9,1,2"),
             case("nine,1"),
             case(""),
    )]
    fn bad_pairs(input: &str) {
        assert!(parse_pair::<f64>(input).is_err());
    }

    #[test]
    fn digits_are_grouped() {
        assert_eq!(group_digits(1234567), "1,234,567");
    }
}
