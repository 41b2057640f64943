use super::*;

#[test]
fn format_aliases_parse_to_the_same_variant() {
    assert_eq!("gecco2020".parse::<InstanceFormat>().unwrap(), InstanceFormat::Gecco2020);
    assert_eq!("gecco".parse::<InstanceFormat>().unwrap(), InstanceFormat::Gecco2020);
    assert_eq!("sts".parse::<InstanceFormat>().unwrap(), InstanceFormat::Fulkerson1974);
    assert_eq!("orlibrary".parse::<InstanceFormat>().unwrap(), InstanceFormat::Balas1980);
    assert_eq!("wedelin".parse::<InstanceFormat>().unwrap(), InstanceFormat::Faster1994);
    assert_eq!("pace2025_ds".parse::<InstanceFormat>().unwrap(), InstanceFormat::Pace2025);
}

#[test]
fn unknown_format_name_is_an_error() {
    let err = "xyz".parse::<InstanceFormat>().unwrap_err();
    match err {
        SetCoverError::UnknownFormat(name) => assert_eq!(name, "xyz"),
        other => panic!("expected UnknownFormat, got {other:?}"),
    }
}

#[test]
fn display_round_trips_through_from_str() {
    for format in [
        InstanceFormat::Gecco2020,
        InstanceFormat::Fulkerson1974,
        InstanceFormat::Balas1980,
        InstanceFormat::Balas1996,
        InstanceFormat::Faster1994,
        InstanceFormat::Pace2025,
    ] {
        let rendered = format.to_string();
        assert_eq!(rendered.parse::<InstanceFormat>().unwrap(), format);
    }
}

#[test]
fn parse_gecco2020_reads_unicost_zero_based_triangle() {
    let content = "3 3\n0 2 0 2\n1 2 0 1\n2 2 1 2\n";
    let instance = parse_instance(content, InstanceFormat::Gecco2020, false).unwrap();
    assert_eq!(instance.number_of_elements(), 3);
    assert_eq!(instance.number_of_sets(), 3);
    assert_eq!(instance.set(0).cost, 1);
    assert!(instance.element(0).sets.contains(&0) && instance.element(0).sets.contains(&2));
}

#[test]
fn parse_fulkerson1974_reads_one_based_triples() {
    // N=2 sets, M=1 element covered by set 1 three times (degenerate but
    // syntactically valid): exercises the fixed-triple-per-element layout.
    let content = "2 1\n1 1 2\n";
    let instance = parse_instance(content, InstanceFormat::Fulkerson1974, false).unwrap();
    assert_eq!(instance.number_of_sets(), 2);
    assert_eq!(instance.number_of_elements(), 1);
}

#[test]
fn parse_fulkerson1974_rejects_zero_set_id() {
    let content = "2 1\n0 1 2\n";
    let err = parse_instance(content, InstanceFormat::Fulkerson1974, false).unwrap_err();
    assert!(matches!(err, SetCoverError::MalformedInstance { .. }));
}

#[test]
fn parse_balas1980_reads_costs_and_one_based_set_lists() {
    let content = "3 3\n 1 1 1\n2 1 3\n2 1 2\n2 2 3\n";
    let instance = parse_instance(content, InstanceFormat::Balas1980, false).unwrap();
    assert_eq!(instance.number_of_elements(), 3);
    assert_eq!(instance.number_of_sets(), 3);
    assert_eq!(instance.set(0).cost, 1);
}

#[test]
fn parse_balas1996_reads_costs_and_one_based_element_lists() {
    let content = "3 3\n1 1 1\n2 1 3\n2 1 2\n2 2 3\n";
    let instance = parse_instance(content, InstanceFormat::Balas1996, false).unwrap();
    assert_eq!(instance.number_of_sets(), 3);
    assert_eq!(instance.number_of_elements(), 3);
}

#[test]
fn parse_faster1994_reads_inline_cost_and_element_list_per_set() {
    let content = "3 3\n1 2 1 3\n1 2 1 2\n1 2 2 3\n";
    let instance = parse_instance(content, InstanceFormat::Faster1994, false).unwrap();
    assert_eq!(instance.number_of_elements(), 3);
    assert_eq!(instance.number_of_sets(), 3);
    assert_eq!(instance.set(0).cost, 1);
}

#[test]
fn parse_pace2025_reads_hitting_set_dual_layout() {
    // 3 vertices (sets), 3 hyperedges (elements): a triangle in the dual.
    let content = "p hs 3 3\n1 3\n1 2\n2 3\n";
    let instance = parse_instance(content, InstanceFormat::Pace2025, false).unwrap();
    assert_eq!(instance.number_of_sets(), 3);
    assert_eq!(instance.number_of_elements(), 3);
}

#[test]
fn parse_pace2025_skips_comment_lines() {
    let content = "c a comment\np hs 2 1\nc another comment\n1 2\n";
    let instance = parse_instance(content, InstanceFormat::Pace2025, false).unwrap();
    assert_eq!(instance.number_of_sets(), 2);
    assert_eq!(instance.number_of_elements(), 1);
}

#[test]
fn parse_pace2025_rejects_missing_header() {
    let content = "";
    let err = parse_instance(content, InstanceFormat::Pace2025, false).unwrap_err();
    assert!(matches!(err, SetCoverError::MalformedInstance { .. }));
}

#[test]
fn unicost_override_forces_every_cost_to_one() {
    let content = "3 3\n 1 5 9\n2 1 3\n2 1 2\n2 2 3\n";
    let instance = parse_instance(content, InstanceFormat::Balas1980, true).unwrap();
    assert!(instance.sets().iter().all(|s| s.cost == 1));
}

#[test]
fn write_balas1980_then_parse_round_trips_incidence() {
    let content = "3 3\n 2 3 4\n2 1 3\n2 1 2\n2 2 3\n";
    let instance = parse_instance(content, InstanceFormat::Balas1980, false).unwrap();
    let mut buffer = Vec::new();
    write_instance_to(&instance, InstanceFormat::Balas1980, &mut buffer).unwrap();
    let written = String::from_utf8(buffer).unwrap();
    let reparsed = parse_instance(&written, InstanceFormat::Balas1980, false).unwrap();
    assert_eq!(reparsed.number_of_elements(), instance.number_of_elements());
    assert_eq!(reparsed.number_of_sets(), instance.number_of_sets());
    assert_eq!(reparsed.total_cost(), instance.total_cost());
}

#[test]
fn write_pace2025_then_parse_round_trips_incidence() {
    let content = "p hs 3 3\n1 3\n1 2\n2 3\n";
    let instance = parse_instance(content, InstanceFormat::Pace2025, false).unwrap();
    let mut buffer = Vec::new();
    write_instance_to(&instance, InstanceFormat::Pace2025, &mut buffer).unwrap();
    let written = String::from_utf8(buffer).unwrap();
    let reparsed = parse_instance(&written, InstanceFormat::Pace2025, false).unwrap();
    assert_eq!(reparsed.number_of_elements(), instance.number_of_elements());
    assert_eq!(reparsed.number_of_sets(), instance.number_of_sets());
}

#[test]
fn writing_an_unsupported_format_is_an_error() {
    let content = "3 3\n0 2 0 2\n1 2 0 1\n2 2 1 2\n";
    let instance = parse_instance(content, InstanceFormat::Gecco2020, false).unwrap();
    let mut buffer = Vec::new();
    let err = write_instance_to(&instance, InstanceFormat::Gecco2020, &mut buffer).unwrap_err();
    assert!(matches!(err, SetCoverError::UnsupportedOperation(_)));
}

#[test]
fn error_messages_report_the_offending_line_number() {
    let content = "3 3\nnot-a-number\n";
    let err = parse_instance(content, InstanceFormat::Fulkerson1974, false).unwrap_err();
    match err {
        SetCoverError::MalformedInstance { line, .. } => assert_eq!(line, 2),
        other => panic!("expected MalformedInstance, got {other:?}"),
    }
}
