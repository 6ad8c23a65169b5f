// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::{CasNumber, Dtxsid, ParseError, Upc};
use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn dtxsid_accepts_every_numeric_suffix(digits in "[0-9]{1,12}") {
        let raw = format!("DTXSID{digits}");
        let parsed = Dtxsid::parse(&raw);
        prop_assert!(parsed.is_ok());
        let sid = parsed.expect("dtxsid");
        prop_assert_eq!(sid.as_str(), raw.as_str());
    }

    #[test]
    fn parsers_never_panic_and_reject_padding(raw in "\\PC{0,40}") {
        let _ = Dtxsid::parse(&raw);
        let padded = format!(" {raw}");
        prop_assert_eq!(Upc::parse(&padded).err(), Some(ParseError::Trimmed("upc")));
        prop_assert!(CasNumber::parse(&padded).is_err());
    }
}

#[test]
fn identifiers_serialize_as_plain_strings() {
    let sid = Dtxsid::parse("DTXSID6026296").expect("dtxsid");
    assert_eq!(
        serde_json::to_string(&sid).expect("json"),
        "\"DTXSID6026296\""
    );
}
