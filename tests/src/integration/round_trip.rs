//! # Request/Reply Round Trips
//!
//! Two peers configured with the same secret exchange requests and replies
//! in both serialization modes.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{Command, Peer};
    use proptest::prelude::*;
    use psk_auth::{EnvelopeSecurityApi, Filter, RequestRouting, SERIALIZER_KEY};
    use shared_types::new_request_id;

    #[test]
    fn test_ping_request_between_peers() {
        let client = Peer::new("topsecret").unwrap();
        let server = Peer::new("topsecret").unwrap();
        let request_id = new_request_id();

        let routing = RequestRouting::new(Filter::new().with_agent("rpcutil"))
            .with_agent("rpcutil")
            .with_collective("mcollective");
        let bytes = client
            .codec
            .encode_request("client1", "/topic/rpcutil", &Command::ping(), &request_id, routing)
            .unwrap();

        let envelope = server.codec.decode::<Command>(&bytes).unwrap();
        assert_eq!(envelope.body, Command::ping());
        assert_eq!(envelope.sender_id, "client1");
        assert_eq!(envelope.request_id, request_id);
        assert_eq!(envelope.target, "/topic/rpcutil");
        assert!(envelope.is_request());

        let routing = envelope.routing.unwrap();
        assert_eq!(routing.caller_id, "uid=1000");
        assert_eq!(routing.agent.as_deref(), Some("rpcutil"));
        assert_eq!(routing.collective.as_deref(), Some("mcollective"));
        assert_eq!(routing.filter.agent, vec!["rpcutil".to_string()]);

        assert_eq!(server.stats.snapshot().validated, 1);
        assert_eq!(server.stats.snapshot().unvalidated, 0);
    }

    #[test]
    fn test_reply_flows_back() {
        let client = Peer::new("topsecret").unwrap();
        let server = Peer::new("topsecret").unwrap();

        let request = client
            .codec
            .encode_request("client1", "/topic/rpcutil", &Command::ping(), "req-9", RequestRouting::default())
            .unwrap();
        let received = server.codec.decode::<Command>(&request).unwrap();

        let reply = server
            .codec
            .encode_reply("server1", "/reply/client1", "pong", &received.request_id)
            .unwrap();
        let envelope = client.codec.decode::<String>(&reply).unwrap();

        assert_eq!(envelope.body, "pong");
        assert_eq!(envelope.request_id, "req-9");
        assert!(envelope.is_reply());
        assert!(envelope.routing.is_none());
        assert_eq!(client.stats.snapshot().validated, 1);
    }

    #[test]
    fn test_yaml_peers_interoperate() {
        let options = [(SERIALIZER_KEY, "yaml")];
        let client = Peer::with_options("topsecret", &options).unwrap();
        let server = Peer::with_options("topsecret", &options).unwrap();

        let bytes = client
            .codec
            .encode_reply("client1", "/reply/x", &Command::ping(), "req-1")
            .unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        // The body is embedded as YAML text, not one list item per byte.
        assert!(text.contains("cmd: ping"));
        assert!(text.lines().count() < 20);

        let envelope = server.codec.decode::<Command>(&bytes).unwrap();
        assert_eq!(envelope.body, Command::ping());
    }

    #[test]
    fn test_empty_body() {
        let client = Peer::new("topsecret").unwrap();
        let bytes = client.codec.encode_reply("a", "b", "", "req").unwrap();
        let envelope = client.codec.decode::<String>(&bytes).unwrap();
        assert_eq!(envelope.body, "");
    }

    #[test]
    fn test_secret_rotation_between_calls() {
        let client = Peer::new("old-secret").unwrap();
        let server = Peer::new("old-secret").unwrap();

        let before = client.codec.encode_reply("c", "t", "one", "r1").unwrap();

        client.config.set(psk_auth::PSK_KEY, "new-secret");
        server.config.set(psk_auth::PSK_KEY, "new-secret");

        let after = client.codec.encode_reply("c", "t", "two", "r2").unwrap();

        // Envelopes signed before rotation no longer verify.
        assert!(server
            .codec
            .decode::<String>(&before)
            .unwrap_err()
            .is_authentication_failure());
        assert_eq!(server.codec.decode::<String>(&after).unwrap().body, "two");
    }

    #[test]
    fn test_missing_secret_blocks_both_directions() {
        let peer = Peer::new("topsecret").unwrap();
        let bytes = peer.codec.encode_reply("a", "b", "x", "r").unwrap();

        peer.config.remove(psk_auth::PSK_KEY);

        let err = peer.codec.encode_reply("a", "b", "x", "r").unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "No plugin.psk configuration option specified");

        assert!(peer.codec.decode::<String>(&bytes).unwrap_err().is_configuration());
        assert_eq!(peer.stats.snapshot().total(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_any_command_round_trips(
            cmd in "[a-zA-Z0-9 _.-]{0,40}",
            args in proptest::collection::vec("[a-z0-9=]{0,12}", 0..6),
            yaml in any::<bool>(),
        ) {
            let mode = if yaml { "yaml" } else { "marshal" };
            let peer = Peer::with_options("topsecret", &[(SERIALIZER_KEY, mode)]).unwrap();
            let message = Command { cmd, args };

            let bytes = peer.codec.encode_reply("a", "b", &message, "r").unwrap();
            let envelope = peer.codec.decode::<Command>(&bytes).unwrap();
            prop_assert_eq!(envelope.body, message);
        }
    }
}
