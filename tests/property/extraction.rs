//! Extraction is stable under re-application and recovers fenced payloads from prose

use kondate::extract::extract_json_payload;
use proptest::prelude::*;

/// extracting from an extracted payload changes nothing
#[test]
fn test_extraction_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"(\\PC|\n|`){0,80}", |text| {
            let once = extract_json_payload(&text);
            prop_assert_eq!(extract_json_payload(once), once);
            Ok(())
        })
        .unwrap();
}

/// a json block surrounded by fence-free prose is returned trimmed
#[test]
fn test_fenced_payload_recovered_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &("[^`]{0,40}", "[^`]{0,40}", "[^`]{0,40}"),
            |(before, body, after)| {
                let text = format!("{}```json\n{}\n```{}", before, body, after);
                prop_assert_eq!(extract_json_payload(&text), body.trim());
                Ok(())
            },
        )
        .unwrap();
}
