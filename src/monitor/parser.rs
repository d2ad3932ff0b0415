use regex::Regex;

/// Lines like `Distance: 12.34 cm`. Only non-negative values can be produced by the ranger.
const DISTANCE_PATTERN: &str = r"^Distance:\s*(\d*\.?\d+)";

/// Extracts distances from the lines printed by the ranger.
///
/// Besides the `Distance: <value> cm` lines, bare numeric lines (`15.4`) are
/// accepted so firmwares that only print the number can be monitored too.
pub struct LineParser {
    distance: Regex,
}

impl LineParser {
    /// Compiles the constant distance pattern
    pub fn new() -> Self {
        Self {
            distance: Regex::new(DISTANCE_PATTERN).expect("distance pattern is a valid regex"),
        }
    }

    /// Returns the distance carried by `line`, or `None` for banners and noise
    pub fn parse_distance(&self, line: &str) -> Option<f64> {
        let line = line.trim();
        if let Some(captures) = self.distance.captures(line) {
            return captures.get(1)?.as_str().parse().ok();
        }
        line.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_parses_ranger_lines() {
        let parser = LineParser::new();
        assert_eq!(parser.parse_distance("Distance: 34.30 cm"), Some(34.3));
        assert_eq!(parser.parse_distance("Distance:7 cm\r"), Some(7.0));
        assert_eq!(parser.parse_distance("Distance: .5 cm"), Some(0.5));
    }

    #[test]
    fn test1_accepts_bare_numbers() {
        let parser = LineParser::new();
        assert_eq!(parser.parse_distance("15.4"), Some(15.4));
        assert_eq!(parser.parse_distance("  3 "), Some(3.0));
    }

    #[test]
    fn test2_rejects_everything_else() {
        let parser = LineParser::new();
        assert_eq!(parser.parse_distance("Ultrasonic ranger ready"), None);
        assert_eq!(parser.parse_distance("Distance: cm"), None);
        assert_eq!(parser.parse_distance("Temperature: 21.50 C"), None);
        assert_eq!(parser.parse_distance("NaN"), None);
        assert_eq!(parser.parse_distance(""), None);
    }
}
