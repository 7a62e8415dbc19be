//! Tests for the Pix BR Code encoder
//!
//! These tests verify that:
//! - Payloads follow the fixed tag order and field layout
//! - The CRC covers everything up to and including `6304`
//! - Name and city are truncated and upper-cased
//! - Invalid input never produces a partial payload

use churrasco::pix::{
    PixChargeRequest, PixError, PixKeyKind, PixPayload, TAG_ORDER, crc16_hex, encode_pix_payload,
    parse_fields, verify_payload,
};

const KNOWN_VECTOR: &str = "00020101021226460014br.gov.bcb.pix0113teste@pix.com0207Churras\
                            520400005303986540510.005802BR5910JOAO SILVA6009SAO PAULO\
                            62070503***63043300";

fn known_request() -> PixChargeRequest {
    PixChargeRequest::new("teste@pix.com", "JOAO SILVA", "SAO PAULO", 10.00)
        .with_description("Churras")
}

fn top_level_ids(payload: &str) -> Vec<String> {
    parse_fields(payload)
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect()
}

fn field(payload: &str, id: &str) -> String {
    parse_fields(payload)
        .unwrap()
        .into_iter()
        .find(|f| f.id == id)
        .map(|f| f.value)
        .unwrap_or_else(|| panic!("missing record {id}"))
}

// =============================================================================
// Layout
// =============================================================================

mod layout_tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        let payload = known_request().encode().unwrap();
        assert_eq!(payload.as_str(), KNOWN_VECTOR);
        assert_eq!(payload.crc(), "3300");
    }

    #[test]
    fn test_known_vector_crc_recomputes() {
        let payload = known_request().encode().unwrap();
        let text = payload.as_str();
        let (covered, crc) = text.split_at(text.len() - 4);

        assert!(covered.ends_with("6304"));
        assert_eq!(crc16_hex(covered), crc);
        assert!(crc.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tag_order() {
        let payload = known_request().encode().unwrap();
        assert_eq!(top_level_ids(payload.as_str()), TAG_ORDER);
    }

    #[test]
    fn test_fixed_fields() {
        let payload = known_request().encode().unwrap();
        let text = payload.as_str();

        assert_eq!(field(text, "00"), "01");
        assert_eq!(field(text, "01"), "12");
        assert_eq!(field(text, "52"), "0000");
        assert_eq!(field(text, "53"), "986");
        assert_eq!(field(text, "58"), "BR");
        assert_eq!(field(text, "62"), "0503***");
    }

    #[test]
    fn test_key_kept_verbatim() {
        let payload = encode_pix_payload("Teste@Pix.com", "Ana", "Recife", 1.0, "").unwrap();
        let decoded = PixPayload::parse(payload.as_str()).unwrap();
        assert_eq!(decoded.key, "Teste@Pix.com");
    }
}

// =============================================================================
// Amount formatting
// =============================================================================

mod amount_tests {
    use super::*;

    fn amount_of(amount: f64) -> String {
        let payload = encode_pix_payload("a@b.c", "Ana", "Recife", amount, "").unwrap();
        field(payload.as_str(), "54")
    }

    #[test]
    fn test_two_decimals() {
        assert_eq!(amount_of(42.0), "42.00");
        assert_eq!(amount_of(7.5), "7.50");
        assert_eq!(amount_of(0.01), "0.01");
        assert_eq!(amount_of(1234.56), "1234.56");
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        for amount in [0.0, 0.004, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = encode_pix_payload("a@b.c", "Ana", "Recife", amount, "");
            assert!(
                matches!(result, Err(PixError::InvalidAmount { .. })),
                "amount {amount} should be rejected"
            );
        }
    }
}

// =============================================================================
// Truncation and description
// =============================================================================

mod truncation_tests {
    use super::*;

    #[test]
    fn test_name_and_city_round_trip_upper_cased() {
        let payload =
            encode_pix_payload("a@b.c", "Maria da Silva", "Belo Horizonte", 5.0, "").unwrap();
        let decoded = PixPayload::parse(payload.as_str()).unwrap();

        assert_eq!(decoded.receiver_name, "MARIA DA SILVA");
        assert_eq!(decoded.city, "BELO HORIZONTE");
    }

    #[test]
    fn test_name_truncated_to_25() {
        let twenty_six = "abcdefghijklmnopqrstuvwxyz";
        let payload = encode_pix_payload("a@b.c", twenty_six, "Recife", 5.0, "").unwrap();
        assert_eq!(field(payload.as_str(), "59"), "ABCDEFGHIJKLMNOPQRSTUVWXY");

        let twenty_five = &twenty_six[..25];
        let payload = encode_pix_payload("a@b.c", twenty_five, "Recife", 5.0, "").unwrap();
        assert_eq!(field(payload.as_str(), "59"), "ABCDEFGHIJKLMNOPQRSTUVWXY");
    }

    #[test]
    fn test_city_truncated_to_15() {
        let payload =
            encode_pix_payload("a@b.c", "Ana", "Sao Jose dos Campos", 5.0, "").unwrap();
        assert_eq!(field(payload.as_str(), "60"), "SAO JOSE DOS CA");
    }

    #[test]
    fn test_description_only_when_present() {
        let without = encode_pix_payload("a@b.c", "Ana", "Recife", 5.0, "").unwrap();
        let account = parse_fields(&field(without.as_str(), "26")).unwrap();
        assert!(account.iter().all(|f| f.id != "02"));

        let with = encode_pix_payload("a@b.c", "Ana", "Recife", 5.0, "Churras").unwrap();
        let account = parse_fields(&field(with.as_str(), "26")).unwrap();
        let description = account.iter().find(|f| f.id == "02").unwrap();
        assert_eq!(description.value, "Churras");
    }

    #[test]
    fn test_non_ascii_length_counts_bytes() {
        let payload = encode_pix_payload("a@b.c", "João", "Maceió", 5.0, "").unwrap();
        assert!(payload.as_str().contains("5905JOÃO"));
        assert!(payload.as_str().contains("6007MACEIÓ"));
        assert!(verify_payload(payload.as_str()).is_ok());
    }

    #[test]
    fn test_wide_name_fits_record() {
        let name = "😀".repeat(30);
        let payload = encode_pix_payload("a@b.c", &name, "Recife", 5.0, "").unwrap();
        assert_eq!(field(payload.as_str(), "59"), "😀".repeat(24));
        assert!(verify_payload(payload.as_str()).is_ok());
    }
}

// =============================================================================
// Validation
// =============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_blank_fields_rejected() {
        assert!(matches!(
            encode_pix_payload("  ", "Ana", "Recife", 5.0, ""),
            Err(PixError::InvalidField { field: "key" })
        ));
        assert!(matches!(
            encode_pix_payload("a@b.c", "", "Recife", 5.0, ""),
            Err(PixError::InvalidField {
                field: "receiver_name"
            })
        ));
        assert!(matches!(
            encode_pix_payload("a@b.c", "Ana", "\t", 5.0, ""),
            Err(PixError::InvalidField { field: "city" })
        ));
    }

    #[test]
    fn test_oversized_key_rejected() {
        let key = "k".repeat(100);
        assert!(matches!(
            encode_pix_payload(&key, "Ana", "Recife", 5.0, ""),
            Err(PixError::FieldTooLong { .. })
        ));
    }

    #[test]
    fn test_oversized_account_group_rejected() {
        // 18 (gui) + 4 + 78 (key) exceeds the 99 limit of tag 26
        let key = "k".repeat(78);
        assert!(matches!(
            encode_pix_payload(&key, "Ana", "Recife", 5.0, ""),
            Err(PixError::FieldTooLong { .. })
        ));
    }
}

// =============================================================================
// Verification
// =============================================================================

mod verification_tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let first = known_request().encode().unwrap();
        let second = known_request().encode().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_known_vector() {
        let decoded = PixPayload::parse(KNOWN_VECTOR).unwrap();

        assert_eq!(decoded.key, "teste@pix.com");
        assert_eq!(decoded.description.as_deref(), Some("Churras"));
        assert_eq!(decoded.amount, "10.00");
        assert_eq!(decoded.receiver_name, "JOAO SILVA");
        assert_eq!(decoded.city, "SAO PAULO");
        assert_eq!(decoded.crc, "3300");
    }

    #[test]
    fn test_tampered_amount_detected() {
        let tampered = KNOWN_VECTOR.replace("540510.00", "540590.00");
        assert!(matches!(
            verify_payload(&tampered),
            Err(PixError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_lowercase_crc_accepted() {
        let payload = encode_pix_payload("teste@pix.com", "JOAO SILVA", "SAO PAULO", 10.0, "")
            .unwrap();
        assert_eq!(payload.crc(), "DAD5");

        let lower = payload.as_str().replace("6304DAD5", "6304dad5");
        assert!(verify_payload(&lower).is_ok());
    }

    #[test]
    fn test_key_kind_of_known_vector() {
        let decoded = PixPayload::parse(KNOWN_VECTOR).unwrap();
        assert_eq!(PixKeyKind::detect(&decoded.key), PixKeyKind::Email);
    }
}
