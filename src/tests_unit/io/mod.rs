use super::*;
use crate::instance::InstanceBuilder;
use std::sync::Arc;

#[test]
fn an_instance_parsed_in_one_format_yields_a_certificate_readable_after_writing_the_other() {
    let content = "3 3\n0 2 0 2\n1 2 0 1\n2 2 1 2\n";
    let instance = Arc::new(read_instance_from_str(content, InstanceFormat::Gecco2020, false));

    let mut solution = crate::solution::Solution::new(Arc::clone(&instance));
    solution.add(0);
    solution.add(1);

    let mut buffer = Vec::new();
    certificate::write_certificate_to(&solution, CertificateFormat::Pace2025, &mut buffer).unwrap();
    let written = String::from_utf8(buffer).unwrap();

    let parsed = certificate::parse_certificate(&written, Arc::clone(&instance), CertificateFormat::Pace2025).unwrap();
    assert_eq!(parsed.cost(), solution.cost());
}

fn read_instance_from_str(
    content: &str,
    format: InstanceFormat,
    unicost: bool,
) -> crate::instance::Instance {
    format::parse_instance(content, format, unicost).unwrap()
}
