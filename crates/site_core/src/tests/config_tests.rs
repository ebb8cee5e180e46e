use super::{apply_env_overrides, apply_file_overrides, prepare_intake_url, Settings};

use std::collections::HashMap;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_match_page_behavior() {
    let settings = Settings::default();
    assert_eq!(settings.intake_url, "/");
    assert_eq!(settings.reveal_offset_px, 100.0);
    assert_eq!(settings.earliest_model_year, 2015);
}

#[test]
fn file_overrides_known_keys() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
intake_url = "https://leads.example.com/reservations"
reveal_offset_px = "60"
earliest_model_year = "2018"
unrelated = "ignored"
"#,
    );
    assert_eq!(settings.intake_url, "https://leads.example.com/reservations");
    assert_eq!(settings.reveal_offset_px, 60.0);
    assert_eq!(settings.earliest_model_year, 2018);
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "intake_url = [");
    assert_eq!(settings, Settings::default());
}

#[test]
fn prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_of(&[
            ("INTAKE_URL", "/plain"),
            ("APP__INTAKE_URL", "/prefixed"),
            ("APP__REVEAL_OFFSET_PX", "not-a-number"),
            ("APP__EARLIEST_MODEL_YEAR", "2016"),
        ]),
    );
    assert_eq!(settings.intake_url, "/prefixed");
    assert_eq!(settings.reveal_offset_px, 100.0);
    assert_eq!(settings.earliest_model_year, 2016);
}

#[test]
fn relative_intake_path_joins_site_origin() {
    let url = prepare_intake_url("https://autos.example.sn", "/").expect("url");
    assert_eq!(url.as_str(), "https://autos.example.sn/");

    let url = prepare_intake_url("https://autos.example.sn", " /api/leads ").expect("url");
    assert_eq!(url.as_str(), "https://autos.example.sn/api/leads");
}

#[test]
fn empty_intake_url_falls_back_to_root() {
    let url = prepare_intake_url("http://127.0.0.1:8080", "   ").expect("url");
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/");
}

#[test]
fn absolute_intake_url_is_kept() {
    let url = prepare_intake_url("http://127.0.0.1:8080", "https://forms.example.com/f/abc")
        .expect("url");
    assert_eq!(url.as_str(), "https://forms.example.com/f/abc");
}

#[test]
fn non_http_intake_url_is_rejected() {
    let err = prepare_intake_url("http://127.0.0.1:8080", "ftp://files.example.com/")
        .expect_err("must reject");
    assert!(err.to_string().contains("http or https"), "{err}");
}

#[test]
fn invalid_site_origin_is_reported() {
    let err = prepare_intake_url("not a url", "/").expect_err("must reject");
    assert!(err.to_string().contains("invalid site origin"), "{err}");
}

#[test]
fn non_finite_reveal_offsets_are_ignored() {
    for raw in ["NaN", "inf", "-infinity"] {
        let mut settings = Settings::default();
        apply_file_overrides(&mut settings, &format!("reveal_offset_px = \"{raw}\""));
        assert_eq!(settings.reveal_offset_px, 100.0, "file value {raw}");

        apply_env_overrides(&mut settings, env_of(&[("APP__REVEAL_OFFSET_PX", raw)]));
        assert_eq!(settings.reveal_offset_px, 100.0, "env value {raw}");
    }

    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, env_of(&[("APP__REVEAL_OFFSET_PX", "-40")]));
    assert_eq!(settings.reveal_offset_px, -40.0);
}
