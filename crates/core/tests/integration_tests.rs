use rate_chart_core::errors::CoreError;
use rate_chart_core::models::chart::{AxisOverride, DisplayMode, RenderRequest};
use rate_chart_core::models::point::{Channel, ParserTier};
use rate_chart_core::models::settings::{ChartSettings, DatePolicy};
use rate_chart_core::RateChart;
use serde_json::{json, Value};

// ═══════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════

/// Three days of rates in the shape a typical backend returns.
fn march_records() -> Vec<Value> {
    vec![
        json!({"date": "2024-03-01", "usdRate": "1,300.00", "eurRate": 1410.2}),
        json!({"date": "2024-03-02", "usdRate": "1,310.00", "eurRate": 1415.8}),
        json!({"date": "2024-03-03", "usdRate": "1,290.00", "eurRate": 1402.4}),
    ]
}

/// `n` consecutive days starting 2024-01-01, delivered newest first.
fn reversed_daily(n: usize) -> Vec<Value> {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..n)
        .rev()
        .map(|i| {
            let date = start + chrono::Duration::days(i as i64);
            json!({"tradeDate": date.format("%Y%m%d").to_string(), "USD": 1300.0 + i as f64})
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
// End-to-end rendering
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_render_three_day_usd_chart() {
    let chart = RateChart::with_defaults();
    let data = chart
        .render(&march_records(), Channel::Usd, &RenderRequest::default())
        .unwrap();

    assert_eq!(data.channel, Channel::Usd);
    assert_eq!(data.tier, ParserTier::Strict);
    assert_eq!(data.mode, DisplayMode::Fit);
    assert_eq!(data.points.len(), 3);

    assert_eq!(data.axis.min, 1288.0);
    assert_eq!(data.axis.max, 1312.0);
    assert_eq!(data.axis.labels.len(), 7);

    assert_eq!(data.points[0].label, "  3/1");
    assert_eq!(data.points[1].label, "3/2");
    assert_eq!(data.points[0].data_point_text, "1,300");
    assert_eq!(data.points[2].value, 2.0);

    assert_eq!(data.spacing.spacing, 44.0);
    assert_eq!(data.spacing.initial_spacing, 30.0);
    assert_eq!(data.spacing.end_spacing, 34.0);
}

#[test]
fn test_render_other_channel_from_same_records() {
    let chart = RateChart::with_defaults();
    let data = chart
        .render(&march_records(), Channel::Eur, &RenderRequest::default())
        .unwrap();

    assert_eq!(data.points.len(), 3);
    assert_eq!(data.points[1].data_point_text, "1,415.8");
}

#[test]
fn test_render_unsorted_compact_dates() {
    let chart = RateChart::with_defaults();
    let data = chart
        .render(&reversed_daily(5), Channel::Usd, &RenderRequest::default())
        .unwrap();

    let labels: Vec<&str> = data.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["  1/1", "1/2", "1/3", "1/4", "1/5"]);
}

#[test]
fn test_render_dense_fit_mode_thins_labels() {
    let chart = RateChart::with_defaults();
    let data = chart
        .render(
            &reversed_daily(60),
            Channel::Usd,
            &RenderRequest::with_mode(DisplayMode::Fit),
        )
        .unwrap();

    let labelled = data.points.iter().filter(|p| !p.label.is_empty()).count();
    assert_eq!(labelled, 20);
    assert!(data.points.iter().all(|p| !p.data_point_text.is_empty()));
}

#[test]
fn test_render_auto_selects_day_mode_for_long_series() {
    let chart = RateChart::with_defaults();
    let data = chart
        .render(&reversed_daily(90), Channel::Usd, &RenderRequest::default())
        .unwrap();

    assert_eq!(data.mode, DisplayMode::Day);
    assert_eq!(data.spacing.spacing, 36.0);
}

#[test]
fn test_render_with_multiplier_and_override() {
    let chart = RateChart::with_defaults();
    let request = RenderRequest {
        mode: Some(DisplayMode::Day),
        axis_override: Some(AxisOverride {
            min: Some(1250.0),
            max: Some(1350.0),
            step: Some(20.0),
            sections: Some(5),
            labels: None,
        }),
        spacing_multiplier: Some(1.5),
    };
    let data = chart.render(&march_records(), Channel::Usd, &request).unwrap();

    assert_eq!(data.axis.min, 1250.0);
    assert_eq!(data.axis.max, 1350.0);
    assert_eq!(data.axis.labels.first().map(String::as_str), Some("1,350"));
    assert_eq!(data.points[0].value, 50.0);
    assert_eq!(data.spacing.spacing, 96.0);
}

#[test]
fn test_render_falls_back_to_lax_parser() {
    let chart = RateChart::with_defaults();
    let records = vec![
        json!({"date": "2024-03-01", "usd": {"quotes": [1300.5]}}),
        json!({"date": "2024-03-02", "usd": {"quotes": [1301.5]}}),
    ];
    let data = chart.render(&records, Channel::Usd, &RenderRequest::default()).unwrap();

    assert_eq!(data.tier, ParserTier::Lax);
    assert_eq!(data.points.len(), 2);
    assert_eq!(data.points[1].data_point_text, "1,301.5");
}

#[test]
fn test_render_no_data_state() {
    let chart = RateChart::with_defaults();
    let records = vec![json!({"date": "2024-03-01", "usdRate": "invalid-$$"}), json!(null)];
    let data = chart.render(&records, Channel::Usd, &RenderRequest::default()).unwrap();

    assert!(data.is_empty());
    assert_eq!(data.tier, ParserTier::Empty);
    assert!(data.axis.min < data.axis.max);
}

#[test]
fn test_render_empty_input() {
    let chart = RateChart::with_defaults();
    let data = chart.render(&[], Channel::Cny, &RenderRequest::default()).unwrap();
    assert!(data.is_empty());
}

// ═══════════════════════════════════════════════════════════════════
// JSON payloads
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_render_json_bare_array() {
    let chart = RateChart::with_defaults();
    let json = r#"[{"date":"2024-03-01","usdRate":1300},{"date":"2024-03-02","usdRate":1310}]"#;
    let data = chart.render_json(json, Channel::Usd, &RenderRequest::default()).unwrap();
    assert_eq!(data.points.len(), 2);
}

#[test]
fn test_render_json_enveloped() {
    let chart = RateChart::with_defaults();
    let json = r#"{"code":0,"result":{"data":[{"baseDate":"2024.03.01","jpy100":"905.12"}]}}"#;
    let data = chart.render_json(json, Channel::Jpy, &RenderRequest::default()).unwrap();

    assert_eq!(data.points.len(), 1);
    assert_eq!(data.points[0].data_point_text, "905.12");
}

#[test]
fn test_render_json_malformed() {
    let chart = RateChart::with_defaults();
    let err = chart
        .render_json("[{\"date\":", Channel::Usd, &RenderRequest::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::Deserialization(_)));
}

#[test]
fn test_render_json_without_records() {
    let chart = RateChart::with_defaults();
    let err = chart
        .render_json(r#"{"message":"ok"}"#, Channel::Usd, &RenderRequest::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidPayload(_)));
}

#[test]
fn test_chart_data_serializes_camel_case() {
    let chart = RateChart::with_defaults();
    let data = chart
        .render(&march_records(), Channel::Usd, &RenderRequest::default())
        .unwrap();
    let v = serde_json::to_value(&data).unwrap();

    assert_eq!(v["points"][0]["dataPointText"], "1,300");
    assert!(v["spacing"]["initialSpacing"].is_number());
    assert!(v["spacing"]["endSpacing"].is_number());
}

// ═══════════════════════════════════════════════════════════════════
// Request validation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_reject_non_positive_multiplier() {
    let chart = RateChart::with_defaults();
    let request = RenderRequest {
        spacing_multiplier: Some(0.0),
        ..RenderRequest::default()
    };
    let err = chart.render(&march_records(), Channel::Usd, &request).unwrap_err();
    assert!(matches!(err, CoreError::ValidationError(_)));
    assert!(chart.layout(10, DisplayMode::Fit, Some(f64::NAN)).is_err());
}

#[test]
fn test_reject_inverted_override_bounds() {
    let chart = RateChart::with_defaults();
    let request = RenderRequest {
        axis_override: Some(AxisOverride {
            min: Some(1400.0),
            max: Some(1300.0),
            ..AxisOverride::default()
        }),
        ..RenderRequest::default()
    };
    assert!(chart.render(&march_records(), Channel::Usd, &request).is_err());
}

#[test]
fn test_reject_bad_override_step_and_sections() {
    let chart = RateChart::with_defaults();
    for o in [
        AxisOverride {
            step: Some(-1.0),
            ..AxisOverride::default()
        },
        AxisOverride {
            sections: Some(0),
            ..AxisOverride::default()
        },
        AxisOverride {
            sections: Some(u32::MAX),
            ..AxisOverride::default()
        },
    ] {
        let request = RenderRequest {
            axis_override: Some(o),
            ..RenderRequest::default()
        };
        assert!(chart.render(&march_records(), Channel::Usd, &request).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_new_rejects_invalid_settings() {
    let settings = ChartSettings {
        screen_width: f64::NAN,
        ..ChartSettings::default()
    };
    assert!(RateChart::new(settings).is_err());
}

#[test]
fn test_from_settings_json() {
    let chart = RateChart::from_settings_json(r#"{"screen_width": 412.0, "locale": "de"}"#).unwrap();
    assert_eq!(chart.settings().screen_width, 412.0);

    let data = chart
        .render(&march_records(), Channel::Usd, &RenderRequest::default())
        .unwrap();
    assert_eq!(data.points[0].data_point_text, "1.300");
}

#[test]
fn test_set_screen_width() {
    let mut chart = RateChart::with_defaults();
    assert!(chart.set_screen_width(-1.0).is_err());
    assert_eq!(chart.settings().screen_width, 360.0);

    chart.set_screen_width(480.0).unwrap();
    let spec = chart.layout(20, DisplayMode::Day, None).unwrap();
    assert_eq!(spec.spacing, 48.0);
}

#[test]
fn test_set_locale() {
    let mut chart = RateChart::with_defaults();
    chart.set_locale("fr").unwrap();
    assert_eq!(chart.settings().locale, "fr");
    assert!(chart.set_locale("").is_err());
    assert_eq!(chart.number_format().format(2.5, 2), "2,5");
}

#[test]
fn test_strict_date_policy_end_to_end() {
    let settings = ChartSettings {
        date_policy: DatePolicy::Strict,
        ..ChartSettings::default()
    };
    let chart = RateChart::new(settings).unwrap();
    let records = vec![
        json!({"date": "2024-03-01", "usd": 1300}),
        json!({"date": "last tuesday", "usd": 1310}),
    ];

    assert_eq!(chart.normalize(&records).len(), 1);
    assert_eq!(RateChart::with_defaults().normalize(&records).len(), 2);
}

// ═══════════════════════════════════════════════════════════════════
// Normalization surface
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_normalize_keeps_all_channels() {
    let chart = RateChart::default();
    let points = chart.normalize(&march_records());

    assert_eq!(points.len(), 3);
    assert_eq!(points[0].usd_rate, Some(1300.0));
    assert_eq!(points[0].eur_rate, Some(1410.2));
    assert!(points[0].jpy_rate.is_none());
}

#[test]
fn test_series_reports_tier() {
    let chart = RateChart::default();
    let series = chart.series(&march_records(), Channel::Usd);
    assert_eq!(series.tier, ParserTier::Strict);
    assert_eq!(series.values(), vec![1300.0, 1310.0, 1290.0]);
}
