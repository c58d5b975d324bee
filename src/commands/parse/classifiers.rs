use regex::Regex;

// Fixed catalog used to confirm that a token is a measurement unit.
pub const UNIT_CATALOG: &[&str] = &[
    "mg/dL",
    "g/dL",
    "mmol/L",
    "%",
    "fl",
    "pg",
    "g/L",
    "U/L",
    "IU/L",
    "/uL",
    "10^3/uL",
    "10^6/uL",
    "mm/hr",
    "mili/cu.mm",
    "ng/dL",
    "ng/mL",
    "pg/mL",
    "mg/L",
    "μL",
    "10^3/μL",
    "uIU/mL",
    "μIU/mL",
    "mEq/L",
];

// Generic header/footer phrases that never carry result data.
pub const SKIP_TERMS: &[&str] = &[
    "Test Name",
    "Result",
    "Unit",
    "Bio. Ref",
    "Bio. Ref. Interval",
    "Method",
    "Page",
    "Report Status",
    "Sample Type",
];

pub fn is_unit(line: &str) -> bool {
    UNIT_CATALOG
        .iter()
        .any(|unit| line.contains(unit) || line.eq_ignore_ascii_case(unit))
}

pub fn is_skip_term(line: &str) -> bool {
    SKIP_TERMS.iter().any(|term| line.contains(term))
}

pub fn find_unit_in(text: &str) -> Option<&'static str> {
    UNIT_CATALOG.iter().copied().find(|unit| text.contains(unit))
}

/// Regexes shared by both scan passes, compiled once per parse call.
#[derive(Debug)]
pub struct LinePatterns {
    number: Regex,
    decimal: Regex,
    range: Regex,
    upper_bound: Regex,
}

impl LinePatterns {
    pub fn compile() -> Option<Self> {
        Some(Self {
            number: Regex::new(r"^\d+(\.\d+)?$").ok()?,
            decimal: Regex::new(r"\d+(\.\d+)?").ok()?,
            range: Regex::new(r"(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)").ok()?,
            upper_bound: Regex::new(r"<\s*(\d+)").ok()?,
        })
    }

    /// A line that is exactly one unsigned decimal number.
    pub fn is_number(&self, line: &str) -> bool {
        self.number.is_match(line)
    }

    /// First decimal-number substring anywhere in the text.
    pub fn first_decimal<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.decimal.find(text).map(|found| found.as_str())
    }

    pub fn extract_range(&self, line: &str) -> Option<(f64, f64)> {
        let captures = self.range.captures(line)?;
        let min = captures.get(1)?.as_str().parse::<f64>().ok()?;
        let max = captures.get(2)?.as_str().parse::<f64>().ok()?;
        Some((min, max))
    }

    pub fn extract_upper_bound(&self, line: &str) -> Option<f64> {
        let captures = self.upper_bound.captures(line)?;
        captures.get(1)?.as_str().parse::<f64>().ok()
    }
}
