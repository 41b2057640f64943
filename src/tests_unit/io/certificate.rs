use super::*;
use crate::instance::InstanceBuilder;

fn triangle() -> Arc<Instance> {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    Arc::new(builder.build().unwrap())
}

#[test]
fn format_aliases_parse_correctly() {
    assert_eq!("".parse::<CertificateFormat>().unwrap(), CertificateFormat::Gecco2020);
    assert_eq!("gecco".parse::<CertificateFormat>().unwrap(), CertificateFormat::Gecco2020);
    assert_eq!("pace2025".parse::<CertificateFormat>().unwrap(), CertificateFormat::Pace2025);
    assert!("bogus".parse::<CertificateFormat>().is_err());
}

#[test]
fn write_then_parse_gecco2020_round_trips() {
    let instance = triangle();
    let mut solution = Solution::new(Arc::clone(&instance));
    solution.add(0);
    solution.add(1);

    let mut buffer = Vec::new();
    write_certificate_to(&solution, CertificateFormat::Gecco2020, &mut buffer).unwrap();
    let written = String::from_utf8(buffer).unwrap();

    let parsed = parse_certificate(&written, Arc::clone(&instance), CertificateFormat::Gecco2020).unwrap();
    assert!(parsed.contains(0) && parsed.contains(1) && !parsed.contains(2));
    assert_eq!(parsed.cost(), solution.cost());
}

#[test]
fn write_then_parse_pace2025_round_trips_with_one_based_ids() {
    let instance = triangle();
    let mut solution = Solution::new(Arc::clone(&instance));
    solution.add(0);
    solution.add(2);

    let mut buffer = Vec::new();
    write_certificate_to(&solution, CertificateFormat::Pace2025, &mut buffer).unwrap();
    let written = String::from_utf8(buffer).unwrap();
    assert!(written.contains('1')); // 0 -> "1"
    assert!(written.contains('3')); // 2 -> "3"

    let parsed = parse_certificate(&written, Arc::clone(&instance), CertificateFormat::Pace2025).unwrap();
    assert!(parsed.contains(0) && parsed.contains(2) && !parsed.contains(1));
}

#[test]
fn parse_rejects_out_of_range_set_id() {
    let instance = triangle();
    let err = parse_certificate("1\n7", Arc::clone(&instance), CertificateFormat::Gecco2020).unwrap_err();
    assert!(matches!(err, SetCoverError::InvalidCertificate(_)));
}

#[test]
fn parse_rejects_duplicate_set_id() {
    let instance = triangle();
    let err = parse_certificate("2\n0 0", Arc::clone(&instance), CertificateFormat::Gecco2020).unwrap_err();
    assert!(matches!(err, SetCoverError::InvalidCertificate(_)));
}

#[test]
fn parse_rejects_fewer_ids_than_declared() {
    let instance = triangle();
    let err = parse_certificate("2\n0", Arc::clone(&instance), CertificateFormat::Gecco2020).unwrap_err();
    assert!(matches!(err, SetCoverError::InvalidCertificate(_)));
}

#[test]
fn parse_rejects_zero_as_a_one_based_id() {
    let instance = triangle();
    let err = parse_certificate("1\n0", Arc::clone(&instance), CertificateFormat::Pace2025).unwrap_err();
    assert!(matches!(err, SetCoverError::InvalidCertificate(_)));
}

#[test]
fn empty_certificate_file_is_an_error() {
    let instance = triangle();
    let err = parse_certificate("", Arc::clone(&instance), CertificateFormat::Gecco2020).unwrap_err();
    assert!(matches!(err, SetCoverError::InvalidCertificate(_)));
}
