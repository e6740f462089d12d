//! # Tampering Resistance
//!
//! A peer without the secret, or a relay that edits envelopes in flight,
//! must never get a body past `decode`.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{Command, Peer};
    use proptest::prelude::*;
    use psk_auth::{EnvelopeSecurityApi, ErrorClass, SecurityError, WireEnvelope, SERIALIZER_KEY};

    fn signed_ping(peer: &Peer) -> Vec<u8> {
        peer.codec
            .encode_reply("client1", "/reply/x", &Command::ping(), "req-1")
            .unwrap()
    }

    /// Re-encodes an envelope in `peer`'s mode after `edit`, keeping the tag.
    fn rewrite(peer: &Peer, bytes: &[u8], edit: impl FnOnce(&mut WireEnvelope)) -> Vec<u8> {
        let serializer = peer.codec.serializer();
        let mut envelope: WireEnvelope = serializer.deserialize(bytes).unwrap();
        edit(&mut envelope);
        serializer.serialize(&envelope).unwrap()
    }

    #[test]
    fn test_wrong_secret_is_rejected_and_counted() {
        let sender = Peer::new("wrong").unwrap();
        let receiver = Peer::new("topsecret").unwrap();

        let err = receiver
            .codec
            .decode::<Command>(&signed_ping(&sender))
            .unwrap_err();

        assert_eq!(
            err,
            SecurityError::AuthenticationFailure {
                sender_id: "client1".to_string(),
                request_id: "req-1".to_string(),
            }
        );
        assert_eq!(err.class(), ErrorClass::Authentication);
        assert_eq!(receiver.stats.snapshot().unvalidated, 1);
        assert_eq!(receiver.stats.snapshot().validated, 0);
    }

    #[test]
    fn test_swapped_body_is_rejected() {
        let peer = Peer::new("topsecret").unwrap();
        let bytes = signed_ping(&peer);

        let forged_body = bincode::serialize(&Command {
            cmd: "shutdown".to_string(),
            args: vec!["now".to_string()],
        })
        .unwrap();
        let forged = rewrite(&peer, &bytes, |e| e.body = forged_body.into());

        assert!(peer
            .codec
            .decode::<Command>(&forged)
            .unwrap_err()
            .is_authentication_failure());
    }

    #[test]
    fn test_uppercased_digest_is_rejected() {
        let peer = Peer::new("topsecret").unwrap();
        let forged = rewrite(&peer, &signed_ping(&peer), |e| {
            e.digest = e.digest.to_uppercase()
        });
        assert!(peer
            .codec
            .decode::<Command>(&forged)
            .unwrap_err()
            .is_authentication_failure());
    }

    #[test]
    fn test_header_edits_are_not_covered_by_digest() {
        // Only the body is authenticated; header fields travel unsigned.
        let peer = Peer::new("topsecret").unwrap();
        let edited = rewrite(&peer, &signed_ping(&peer), |e| {
            e.sender_id = "someone-else".to_string()
        });

        let envelope = peer.codec.decode::<Command>(&edited).unwrap();
        assert_eq!(envelope.sender_id, "someone-else");
        assert_eq!(envelope.body, Command::ping());
    }

    #[test]
    fn test_failure_reports_claimed_header_as_received() {
        let sender = Peer::new("wrong").unwrap();
        let receiver = Peer::new("topsecret").unwrap();
        let forged = rewrite(&sender, &signed_ping(&sender), |e| {
            e.sender_id = "trusted-admin".to_string()
        });

        match receiver.codec.decode::<Command>(&forged) {
            Err(SecurityError::AuthenticationFailure { sender_id, .. }) => {
                assert_eq!(sender_id, "trusted-admin")
            }
            other => panic!("expected authentication failure, got {other:?}"),
        }
    }

    #[test]
    fn test_mode_mismatch_is_deserialization_error() {
        let yaml_peer = Peer::with_options("topsecret", &[(SERIALIZER_KEY, "yaml")]).unwrap();
        let binary_peer = Peer::new("topsecret").unwrap();

        let err = binary_peer
            .codec
            .decode::<Command>(&signed_ping(&yaml_peer))
            .unwrap_err();
        assert!(err.is_deserialization());
        assert_eq!(binary_peer.stats.snapshot().total(), 0);
    }

    #[test]
    fn test_binary_envelope_at_yaml_peer_is_deserialization_error() {
        let binary_peer = Peer::new("topsecret").unwrap();
        let yaml_peer = Peer::with_options("topsecret", &[(SERIALIZER_KEY, "yaml")]).unwrap();

        let err = yaml_peer
            .codec
            .decode::<Command>(&signed_ping(&binary_peer))
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Encoding);
        assert_eq!(yaml_peer.stats.snapshot().total(), 0);
    }

    #[test]
    fn test_yaml_body_edit_is_rejected() {
        let peer = Peer::with_options("topsecret", &[(SERIALIZER_KEY, "yaml")]).unwrap();
        let forged = rewrite(&peer, &signed_ping(&peer), |e| {
            let text = String::from_utf8(e.body.to_vec()).unwrap();
            e.body = text.replace("ping", "halt").into_bytes().into();
        });

        assert!(peer
            .codec
            .decode::<Command>(&forged)
            .unwrap_err()
            .is_authentication_failure());
        assert_eq!(peer.stats.snapshot().unvalidated, 1);
    }

    #[test]
    fn test_garbage_is_deserialization_error() {
        let peer = Peer::new("topsecret").unwrap();
        for input in [&b""[..], b"\x00", b"not an envelope at all"] {
            assert!(peer.codec.decode::<Command>(input).unwrap_err().is_deserialization());
        }
        assert_eq!(peer.stats.snapshot().total(), 0);
    }

    #[test]
    fn test_valid_digest_wrong_body_type() {
        let peer = Peer::new("topsecret").unwrap();
        let bytes = peer.codec.encode_reply("a", "b", &7u8, "r").unwrap();

        let err = peer.codec.decode::<Command>(&bytes).unwrap_err();
        assert!(err.is_deserialization());
        // Digest verification already succeeded.
        assert_eq!(peer.stats.snapshot().validated, 1);
    }

    #[test]
    fn test_every_tag_position_is_checked() {
        let peer = Peer::new("topsecret").unwrap();
        let bytes = signed_ping(&peer);
        for position in 0..32 {
            let forged = rewrite(&peer, &bytes, |e| {
                let mut chars: Vec<char> = e.digest.chars().collect();
                chars[position] = if chars[position] == '0' { '1' } else { '0' };
                e.digest = chars.into_iter().collect();
            });
            assert!(peer
                .codec
                .decode::<Command>(&forged)
                .unwrap_err()
                .is_authentication_failure());
        }
        assert_eq!(peer.stats.snapshot().unvalidated, 32);
    }

    #[test]
    fn test_truncated_digest_is_rejected() {
        let peer = Peer::new("topsecret").unwrap();
        let forged = rewrite(&peer, &signed_ping(&peer), |e| e.digest.truncate(31));
        assert!(peer
            .codec
            .decode::<Command>(&forged)
            .unwrap_err()
            .is_authentication_failure());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_any_body_bit_flip_is_rejected(
            body in proptest::collection::vec(any::<u8>(), 1..256),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
            yaml in any::<bool>(),
        ) {
            let mode = if yaml { "yaml" } else { "marshal" };
            let peer = Peer::with_options("topsecret", &[(SERIALIZER_KEY, mode)]).unwrap();
            let bytes = peer.codec.encode_reply("a", "b", &body, "r").unwrap();

            let forged = rewrite(&peer, &bytes, |e| {
                let i = index.index(e.body.len());
                e.body[i] ^= 1 << bit;
            });

            let err = peer.codec.decode::<Vec<u8>>(&forged).unwrap_err();
            prop_assert!(err.is_authentication_failure());
        }

        #[test]
        fn prop_other_secret_never_verifies(secret in "[a-zA-Z0-9]{1,32}") {
            prop_assume!(secret != "topsecret");
            let sender = Peer::new(&secret).unwrap();
            let receiver = Peer::new("topsecret").unwrap();

            let err = receiver.codec.decode::<Command>(&signed_ping(&sender)).unwrap_err();
            prop_assert!(err.is_authentication_failure());
        }
    }
}
