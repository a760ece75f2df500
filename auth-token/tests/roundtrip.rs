//! Round-trip property: any identity issued by the codec decodes back to
//! the same subject id and role set.

use auth_token::{Role, TokenCodec, TokenConfig};
use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

fn role_set() -> impl Strategy<Value = HashSet<Role>> {
    proptest::sample::subsequence(vec![Role::User, Role::Admin, Role::SuperAdmin], 1..=3)
        .prop_map(|roles| roles.into_iter().collect())
}

fn email() -> impl Strategy<Value = String> {
    "[a-z]{1,12}@[a-z]{1,8}\\.(com|dev|org)"
}

proptest! {
    #[test]
    fn issue_decode_preserves_subject_and_roles(
        bytes in any::<[u8; 16]>(),
        email in email(),
        roles in role_set(),
    ) {
        let codec = TokenCodec::new(TokenConfig::new("property-secret"));
        let subject_id = Uuid::from_bytes(bytes);

        let issued = codec.issue(subject_id, &email, &roles).unwrap();
        let identity = codec.decode(&issued.token).unwrap();

        prop_assert_eq!(identity.subject_id, subject_id);
        prop_assert_eq!(identity.email, email);
        prop_assert_eq!(identity.roles, roles);
    }

    #[test]
    fn decode_never_panics_on_arbitrary_input(input in "\\PC*") {
        let codec = TokenCodec::new(TokenConfig::new("property-secret"));
        let _ = codec.decode(&input);
    }
}
