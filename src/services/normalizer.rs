// src/services/normalizer.rs

//! Record normalization.
//!
//! Flattens one catalog record into a [`PriceRow`], deriving the burst
//! baseline, the effective clock speed and the hourly/monthly price.

use crate::error::{AppError, Result};
use crate::models::{Architecture, PriceRow, RawProduct};

/// Hours billed in a 30-day month.
pub const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// Clock speed assumed when a record does not publish one.
const DEFAULT_CLOCK_SPEED: &str = "0 GHz";

/// Baseline for burstable sizes missing from [`BURST_BASELINES`].
const DEFAULT_BURST_BASELINE: f64 = 10.0;

/// Baseline performance (percent) of burstable instances by size.
const BURST_BASELINES: &[(&str, f64)] = &[
    ("nano", 5.0),
    ("micro", 10.0),
    ("small", 20.0),
    ("medium", 40.0),
    ("large", 60.0),
    ("xlarge", 90.0),
    ("2xlarge", 135.0),
];

/// Normalize one catalog record.
pub fn normalize(p: &RawProduct) -> Result<PriceRow> {
    let (instance_type, size) = split_instance_type(&p.attr("instanceType")?);
    let processor = p.attr("physicalProcessor")?;
    let burst = is_burstable(&instance_type);
    let base = baseline(burst, &size);

    let speed = p
        .optional_attr("clockSpeed")?
        .unwrap_or_else(|| DEFAULT_CLOCK_SPEED.to_string());
    let ghz = parse_clock_speed(&speed)
        .ok_or_else(|| AppError::malformed(p.id(), format!("unparsable clockSpeed '{speed}'")))?;
    let actual = format_ghz(ghz * base / 100.0);

    let term = p.first_on_demand_term()?;
    let starting = term
        .effective_date
        .clone()
        .ok_or_else(|| AppError::malformed(p.id(), "term has no effectiveDate"))?;
    let dimension = term.first_price_dimension(p.id())?;
    let (cur, price) = dimension.first_price(p.id())?;
    let hourly = if dimension.unit(p.id())? == "Hrs" {
        price
    } else {
        0.0
    };

    Ok(PriceRow {
        family: p.attr("instanceFamily")?,
        instance_type,
        size,
        burst,
        base,
        arch: architecture(&processor),
        processor,
        bit: p.attr("processorArchitecture")?,
        tenancy: p.attr("tenancy")?,
        region: p.attr("location")?,
        vcpu: p.attr("vcpu")?,
        memory: p.attr("memory")?,
        storage: p.attr("storage")?,
        os: p.attr("operatingSystem")?,
        norm: p.attr("normalizationSizeFactor")?,
        speed,
        actual,
        network: p.attr("networkPerformance")?,
        generation: p.attr("currentGeneration")?,
        cur,
        hourly,
        monthly: hourly * HOURS_PER_MONTH,
        starting,
    })
}

/// Split `family.size` into the type segment and the joined remaining segments.
pub fn split_instance_type(instance_type: &str) -> (String, String) {
    match instance_type.split_once('.') {
        Some((kind, rest)) => (kind.to_string(), rest.split('.').collect()),
        None => (instance_type.to_string(), String::new()),
    }
}

/// Graviton processors are ARM; everything else is treated as x86.
pub fn architecture(processor: &str) -> Architecture {
    if processor.contains("Graviton") {
        Architecture::Arm
    } else {
        Architecture::X86
    }
}

/// Any type segment containing a lowercase `t` counts as burstable.
///
/// This over-matches (e.g. `trn1`, `u-6tb1`), and the stored snapshot
/// depends on exactly this rule.
pub fn is_burstable(instance_type: &str) -> bool {
    instance_type.contains('t')
}

/// Baseline performance in percent.
pub fn baseline(burst: bool, size: &str) -> f64 {
    if !burst {
        return 100.0;
    }
    BURST_BASELINES
        .iter()
        .find(|(name, _)| *name == size)
        .map_or(DEFAULT_BURST_BASELINE, |(_, base)| *base)
}

/// Parse the number in a clock speed such as `"2.5 GHz"` or `"Up to 3.1 GHz"`.
///
/// Accepted shape: an optional prefix free of digits and `+`, a number
/// (`123` or `123.45`), then a non-empty unit free of digits and `+`.
pub fn parse_clock_speed(speed: &str) -> Option<f64> {
    let is_plain = |c: char| !c.is_ascii_digit() && c != '+';

    let start = speed.find(|c: char| !is_plain(c))?;
    let rest = &speed[start..];

    let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if int_len == 0 {
        return None;
    }

    let mut num_len = int_len;
    if let Some(frac) = rest[int_len..].strip_prefix('.') {
        let frac_len = frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
        if frac_len > 0 {
            num_len += 1 + frac_len;
        }
    }

    let unit = &rest[num_len..];
    if unit.is_empty() || !unit.chars().all(is_plain) {
        return None;
    }

    rest[..num_len].parse().ok()
}

/// Render a speed in GHz, keeping a fractional part on whole numbers.
pub fn format_ghz(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1} GHz")
    } else {
        format!("{value} GHz")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record(
        instance_type: &str,
        processor: &str,
        clock: Option<&str>,
        unit: &str,
        price: &str,
    ) -> Value {
        let mut attributes = json!({
            "instanceFamily": "General purpose",
            "instanceType": instance_type,
            "physicalProcessor": processor,
            "processorArchitecture": "64-bit",
            "tenancy": "Shared",
            "location": "US East (Ohio)",
            "vcpu": "2",
            "memory": "4 GiB",
            "storage": "EBS only",
            "operatingSystem": "Linux",
            "normalizationSizeFactor": "2",
            "networkPerformance": "Up to 5 Gigabit",
            "currentGeneration": "Yes"
        });
        if let Some(clock) = clock {
            attributes["clockSpeed"] = json!(clock);
        }
        json!({
            "product": {"sku": "SKU", "attributes": attributes},
            "terms": {"OnDemand": {"SKU.T": {
                "effectiveDate": "2021-06-01T00:00:00Z",
                "priceDimensions": {"SKU.T.D": {
                    "unit": unit,
                    "pricePerUnit": {"USD": price}
                }}
            }}}
        })
    }

    fn normalize_value(value: Value) -> Result<PriceRow> {
        normalize(&RawProduct::from_value(value)?)
    }

    #[test]
    fn test_t3_medium_scenario() {
        let row = normalize_value(record(
            "t3.medium",
            "Intel Skylake E5 2686 v5",
            Some("2.5 GHz"),
            "Hrs",
            "0.0416",
        ))
        .unwrap();

        assert_eq!(row.instance_type, "t3");
        assert_eq!(row.size, "medium");
        assert!(row.burst);
        assert_eq!(row.burst_label(), "Yes");
        assert_eq!(row.base, 40.0);
        assert_eq!(row.arch, Architecture::X86);
        assert_eq!(row.speed, "2.5 GHz");
        assert_eq!(row.actual, "1.0 GHz");
        assert_eq!(row.cur, "USD");
        assert_eq!(row.hourly, 0.0416);
        assert!((row.monthly - 29.952).abs() < 1e-9);
        assert_eq!(row.monthly, row.hourly * 720.0);
        assert_eq!(row.starting, "2021-06-01T00:00:00Z");
    }

    #[test]
    fn test_passthrough_fields() {
        let row = normalize_value(record(
            "m5.large",
            "Intel Xeon",
            Some("3.1 GHz"),
            "Hrs",
            "0.096",
        ))
        .unwrap();

        assert_eq!(row.family, "General purpose");
        assert_eq!(row.processor, "Intel Xeon");
        assert_eq!(row.bit, "64-bit");
        assert_eq!(row.tenancy, "Shared");
        assert_eq!(row.region, "US East (Ohio)");
        assert_eq!(row.vcpu, "2");
        assert_eq!(row.memory, "4 GiB");
        assert_eq!(row.storage, "EBS only");
        assert_eq!(row.os, "Linux");
        assert_eq!(row.norm, "2");
        assert_eq!(row.network, "Up to 5 Gigabit");
        assert_eq!(row.generation, "Yes");
        assert!(!row.burst);
        assert_eq!(row.base, 100.0);
        assert_eq!(row.actual, "3.1 GHz");
    }

    #[test]
    fn test_split_instance_type() {
        let cases = [
            ("c5.2xlarge", ("c5", "2xlarge")),
            ("t3.medium", ("t3", "medium")),
            ("u-6tb1.metal", ("u-6tb1", "metal")),
            ("a.b.c", ("a", "bc")),
            ("m5", ("m5", "")),
            ("x1.", ("x1", "")),
        ];
        for (input, (kind, size)) in cases {
            assert_eq!(
                split_instance_type(input),
                (kind.to_string(), size.to_string()),
                "{input}"
            );
        }
    }

    #[test]
    fn test_architecture() {
        assert_eq!(architecture("AWS Graviton2 Processor"), Architecture::Arm);
        assert_eq!(architecture("AWS Graviton"), Architecture::Arm);
        assert_eq!(architecture("AMD EPYC 7571"), Architecture::X86);
        assert_eq!(architecture("graviton"), Architecture::X86);
    }

    #[test]
    fn test_burst_is_substring_match() {
        assert!(is_burstable("t2"));
        assert!(is_burstable("t4g"));
        assert!(is_burstable("trn1"));
        assert!(is_burstable("u-6tb1"));
        assert!(!is_burstable("inf1"));
        assert!(!is_burstable("dl1"));
        assert!(!is_burstable("m5"));
        assert!(!is_burstable("T3"));
    }

    #[test]
    fn test_baseline_table() {
        let cases = [
            ("nano", 5.0),
            ("micro", 10.0),
            ("small", 20.0),
            ("medium", 40.0),
            ("large", 60.0),
            ("xlarge", 90.0),
            ("2xlarge", 135.0),
            ("4xlarge", 10.0),
            ("metal", 10.0),
            ("", 10.0),
        ];
        for (size, expected) in cases {
            assert_eq!(baseline(true, size), expected, "{size}");
            assert_eq!(baseline(false, size), 100.0, "{size}");
        }
    }

    #[test]
    fn test_parse_clock_speed() {
        assert_eq!(parse_clock_speed("2.5 GHz"), Some(2.5));
        assert_eq!(parse_clock_speed("0 GHz"), Some(0.0));
        assert_eq!(parse_clock_speed("Up to 3.1 GHz"), Some(3.1));
        assert_eq!(parse_clock_speed("3GHz"), Some(3.0));
        assert_eq!(parse_clock_speed("2. GHz"), Some(2.0));
        assert_eq!(parse_clock_speed("2.5"), None);
        assert_eq!(parse_clock_speed("GHz"), None);
        assert_eq!(parse_clock_speed(""), None);
        assert_eq!(parse_clock_speed("+2.5 GHz"), None);
        assert_eq!(parse_clock_speed("2.5 GHz to 3.5 GHz"), None);
    }

    #[test]
    fn test_format_ghz() {
        assert_eq!(format_ghz(1.0), "1.0 GHz");
        assert_eq!(format_ghz(0.0), "0.0 GHz");
        assert_eq!(format_ghz(2.5), "2.5 GHz");
        assert_eq!(format_ghz(3.375), "3.375 GHz");
    }

    #[test]
    fn test_actual_speed_scaled_by_baseline() {
        let row = normalize_value(record(
            "t2.2xlarge",
            "Intel Xeon",
            Some("2.5 GHz"),
            "Hrs",
            "0.3712",
        ))
        .unwrap();
        assert_eq!(row.base, 135.0);
        assert_eq!(row.actual, "3.375 GHz");

        let row = normalize_value(record(
            "c5.large",
            "Intel Xeon",
            Some("2.5 GHz"),
            "Hrs",
            "0.085",
        ))
        .unwrap();
        assert_eq!(row.actual, "2.5 GHz");
    }

    #[test]
    fn test_missing_clock_speed_defaults_to_zero() {
        let row = normalize_value(record(
            "a1.large",
            "AWS Graviton Processor",
            None,
            "Hrs",
            "0.051",
        ))
        .unwrap();
        assert_eq!(row.speed, "0 GHz");
        assert_eq!(row.actual, "0.0 GHz");
        assert_eq!(row.arch, Architecture::Arm);
    }

    #[test]
    fn test_null_clock_speed_fails() {
        let mut value = record("a1.large", "AWS Graviton Processor", None, "Hrs", "0.051");
        value["product"]["attributes"]["clockSpeed"] = Value::Null;

        let err = normalize_value(value).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { .. }));
        assert!(err.to_string().contains("clockSpeed"));
    }

    #[test]
    fn test_unparsable_clock_speed_fails() {
        let err =
            normalize_value(record("m5.large", "Intel", Some("fast"), "Hrs", "0.1")).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { .. }));
    }

    #[test]
    fn test_non_hourly_unit_zeroes_price() {
        let row = normalize_value(record(
            "m5.large",
            "Intel",
            Some("2.5 GHz"),
            "Quantity",
            "1234",
        ))
        .unwrap();
        assert_eq!(row.hourly, 0.0);
        assert_eq!(row.monthly, 0.0);
        assert_eq!(row.cur, "USD");

        let row =
            normalize_value(record("m5.large", "Intel", Some("2.5 GHz"), "hrs", "0.1")).unwrap();
        assert_eq!(row.hourly, 0.0);
    }

    #[test]
    fn test_missing_unit_fails() {
        let mut value = record("m5.large", "Intel", Some("2.5 GHz"), "Hrs", "0.096");
        value["terms"]["OnDemand"]["SKU.T"]["priceDimensions"]["SKU.T.D"] =
            json!({"pricePerUnit": {"USD": "0.096"}});

        let err = normalize_value(value).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { ref record, .. } if record == "SKU"));
        assert!(err.to_string().contains("no unit"));
    }

    #[test]
    fn test_unparsable_price_fails() {
        let value = record("m5.large", "Intel", Some("2.5 GHz"), "Hrs", "n/a");
        let err = normalize_value(value).unwrap_err();
        assert!(err.to_string().contains("USD"));
    }

    #[test]
    fn test_missing_required_attribute_fails() {
        let mut value = record("m5.large", "Intel", Some("2.5 GHz"), "Hrs", "0.1");
        value["product"]["attributes"]
            .as_object_mut()
            .unwrap()
            .remove("networkPerformance");

        let err = normalize_value(value).unwrap_err();
        assert!(err.to_string().contains("networkPerformance"));
        assert!(err.to_string().contains("SKU"));
    }

    #[test]
    fn test_missing_on_demand_terms_fails() {
        let mut value = record("m5.large", "Intel", Some("2.5 GHz"), "Hrs", "0.1");
        value["terms"].as_object_mut().unwrap().remove("OnDemand");

        let err = normalize_value(value).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { .. }));
    }

    #[test]
    fn test_empty_price_dimensions_fails() {
        let mut value = record("m5.large", "Intel", Some("2.5 GHz"), "Hrs", "0.1");
        value["terms"]["OnDemand"]["SKU.T"]["priceDimensions"] = json!({});

        let err = normalize_value(value).unwrap_err();
        assert!(err.to_string().contains("price dimensions"));
    }

    #[test]
    fn test_first_term_and_dimension_win() {
        let mut value = record("m5.large", "Intel", Some("2.5 GHz"), "Hrs", "0.1");
        value["terms"]["OnDemand"]["SKU.U"] = json!({
            "effectiveDate": "2022-01-01T00:00:00Z",
            "priceDimensions": {"SKU.U.D": {"unit": "Hrs", "pricePerUnit": {"EUR": "9.0"}}}
        });
        value["terms"]["OnDemand"]["SKU.T"]["priceDimensions"]["SKU.T.E"] =
            json!({"unit": "Hrs", "pricePerUnit": {"USD": "5.0"}});

        let row = normalize_value(value).unwrap();
        assert_eq!(row.starting, "2021-06-01T00:00:00Z");
        assert_eq!(row.cur, "USD");
        assert_eq!(row.hourly, 0.1);
    }
}
