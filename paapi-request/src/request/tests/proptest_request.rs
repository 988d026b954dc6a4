use proptest::prelude::*;

use crate::{
    error::RequestError,
    locale::LOCALE_TABLE,
    request::{CredentialField, RequestConfig},
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_codes_outside_table_are_rejected(code in "[A-Za-z]{0,4}") {
        prop_assume!(!LOCALE_TABLE.contains(&code));

        let result = RequestConfig::new(Some(&code));
        prop_assert_eq!(result.unwrap_err(), RequestError::InvalidLocale(code.clone()));
    }

    #[test]
    fn test_last_tag_wins_in_params(tags in prop::collection::vec("[a-z0-9-]{1,20}", 1..8)) {
        let mut request = RequestConfig::new(None).unwrap();
        for tag in &tags {
            request.set_tag(tag.as_str());
        }

        let params = request.params().unwrap();
        prop_assert_eq!(&params["AssociateTag"], tags.last().unwrap());
    }

    #[test]
    fn test_unknown_field_leaves_request_untouched(
        name in "[a-z]{1,10}",
        value in "[ -~]{0,20}",
    ) {
        prop_assume!(name.parse::<CredentialField>().is_err());

        let mut request = RequestConfig::new(Some("IN")).unwrap();
        request.configure([("key", "K"), ("tag", "T")]).unwrap();

        let result = request.configure([
            ("key", "changed"),
            (name.as_str(), value.as_str()),
        ]);

        prop_assert_eq!(result, Err(RequestError::UnknownCredentialField(name.clone())));
        prop_assert_eq!(request.key(), Some("K"));
        prop_assert_eq!(request.tag().unwrap(), "T");
    }

    #[test]
    fn test_every_supported_locale_builds_endpoint(index in 0..LOCALE_TABLE.len()) {
        let code = LOCALE_TABLE.codes().nth(index).unwrap();
        let request = RequestConfig::new(Some(code)).unwrap();

        prop_assert!(request.endpoint().starts_with("http://"));
        prop_assert!(request.endpoint().ends_with("/onca/xml"));
    }
}
