use argon2_engine::derivation::argon2::params::{MAX_MEMORY_COST, MAX_PARALLELISM, MAX_TIME_COST};
use argon2_engine::derivation::{
    Argon2Error, Argon2Mode, Argon2Options, Argon2Params, HashOutput, OutputEncoding, hash,
    hash_raw,
};

fn small(mode: Argon2Mode) -> Argon2Options {
    Argon2Options::default()
        .with_mode(mode)
        .with_memory(32)
        .with_iterations(3)
        .with_parallelism(4)
        .with_salt("saltsalt")
}

fn raw(password: &[u8], options: &Argon2Options) -> Vec<u8> {
    match hash(password, options).unwrap() {
        HashOutput::Raw(digest) => digest,
        HashOutput::Encoded(encoded) => panic!("expected raw output, got {encoded}"),
    }
}

/// RFC 9106 §5 inputs shared by the three variants.
///
///   password: 32 bytes of 0x01
///   salt: 16 bytes of 0x02
///   secret: 8 bytes of 0x03
///   associated data: 12 bytes of 0x04
///   parallelism: 4, tag length: 32, memory: 32 KiB, iterations: 3
fn rfc9106(mode: Argon2Mode) -> Vec<u8> {
    let options = Argon2Options::default()
        .with_mode(mode)
        .with_memory(32)
        .with_iterations(3)
        .with_parallelism(4)
        .with_output_len(32)
        .with_salt([0x02u8; 16])
        .with_secret([0x03u8; 8])
        .with_associated_data([0x04u8; 12]);

    raw(&[0x01u8; 32], &options)
}

#[test]
fn argon2d_rfc9106_test_vector() {
    assert_eq!(
        hex::encode(rfc9106(Argon2Mode::Argon2d)),
        "512b391b6f1162975371d30919734294f868e3be3984f3c1a13a4db9fabe4acb"
    );
}

#[test]
fn argon2i_rfc9106_test_vector() {
    assert_eq!(
        hex::encode(rfc9106(Argon2Mode::Argon2i)),
        "c814d9d1dc7f37aa13f0d77f2494bda1c8de6b016dd388d29952a4c4672b6ce8"
    );
}

#[test]
fn argon2id_rfc9106_test_vector() {
    // Tag: 0d 64 0d f5 8d 78 76 6c 08 c0 37 a3 4a 8b 53 c9
    //      d0 1e f0 45 2d 75 b6 5e b5 25 20 e9 6b 01 e6 59
    let expected = [
        0x0d, 0x64, 0x0d, 0xf5, 0x8d, 0x78, 0x76, 0x6c, 0x08, 0xc0, 0x37, 0xa3, 0x4a, 0x8b, 0x53,
        0xc9, 0xd0, 0x1e, 0xf0, 0x45, 0x2d, 0x75, 0xb6, 0x5e, 0xb5, 0x25, 0x20, 0xe9, 0x6b, 0x01,
        0xe6, 0x59,
    ];

    assert_eq!(
        rfc9106(Argon2Mode::Argon2id),
        expected,
        "Argon2id output does not match RFC 9106 test vector"
    );
}

#[test]
fn default_options_raw_vector() {
    let digest = hash(b"Hi CatCrypto!", &Argon2Options::default()).unwrap();
    assert_eq!(
        digest.to_hex(),
        "7c10d417627fbfaf5728e77dc320d0a7597955bf7b71a22b188bc9ec74762a4f"
    );
}

#[test]
fn default_options_encoded_vector() {
    let options = Argon2Options::default().with_encoding(OutputEncoding::Encoded);
    let encoded = hash(b"Hi CatCrypto!", &options).unwrap();
    assert_eq!(
        encoded.as_encoded(),
        Some("$argon2i$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$fBDUF2J/v69XKOd9wyDQp1l5Vb97caIrGIvJ7HR2Kk8")
    );
}

#[test]
fn argon2id_raw_bytes_vector() {
    let options = Argon2Options::default()
        .with_mode(Argon2Mode::Argon2id)
        .with_iterations(1)
        .with_parallelism(1)
        .with_memory(1024)
        .with_output_len(8)
        .with_salt(hex::decode("0e0e6fd368aac433f4b59ce218233385").unwrap());
    let password = hex::decode("15b59b443d8c662473e1534189e46f17").unwrap();

    assert_eq!(hex::encode(raw(&password, &options)), "2b77a93c0470b400");
}

#[test]
fn hashing_is_deterministic() {
    for mode in [Argon2Mode::Argon2d, Argon2Mode::Argon2i, Argon2Mode::Argon2id] {
        let a = raw(b"password", &small(mode));
        let b = raw(b"password", &small(mode));
        assert_eq!(a, b);
    }
}

#[test]
fn empty_password_produces_digest() {
    assert_eq!(raw(b"", &Argon2Options::default()).len(), 32);
}

#[test]
fn each_parameter_changes_the_digest() {
    let base = small(Argon2Mode::Argon2id);
    let reference = raw(b"password", &base);

    let variants = [
        base.clone().with_mode(Argon2Mode::Argon2d),
        base.clone().with_mode(Argon2Mode::Argon2i),
        base.clone().with_iterations(4),
        base.clone().with_memory(64),
        base.clone().with_parallelism(2),
        base.clone().with_salt("saltSALT"),
        base.clone().with_secret("pepper"),
        base.clone().with_associated_data("context"),
    ];

    for options in &variants {
        assert_ne!(raw(b"password", options), reference, "{options:?}");
    }

    assert_ne!(raw(b"different", &base), reference);
}

#[test]
fn output_length_is_respected() {
    let base = small(Argon2Mode::Argon2id).with_iterations(1);
    for len in [4, 16, 32, 64, 65, 128, 1024] {
        assert_eq!(raw(b"password", &base.clone().with_output_len(len)).len(), len as usize);
    }
}

#[test]
fn shorter_output_is_not_a_prefix() {
    let base = small(Argon2Mode::Argon2id).with_iterations(1);
    let short = raw(b"password", &base.clone().with_output_len(16));
    let long = raw(b"password", &base.with_output_len(32));
    assert_ne!(short[..], long[..16]);
}

#[test]
fn zero_iterations_clamp_to_one() {
    let base = Argon2Options::default().with_memory(64);
    assert_eq!(
        raw(b"Hi CatCrypto!", &base.clone().with_iterations(0)),
        raw(b"Hi CatCrypto!", &base.with_iterations(1))
    );
}

#[test]
fn zero_memory_clamps_to_lane_floor() {
    let base = Argon2Options::default().with_iterations(1);
    assert_eq!(
        raw(b"Hi CatCrypto!", &base.clone().with_memory(0)),
        raw(b"Hi CatCrypto!", &base.with_memory(8))
    );
}

#[test]
fn zero_parallelism_clamps_to_one() {
    let base = Argon2Options::default().with_memory(64).with_iterations(1);
    assert_eq!(
        raw(b"Hi CatCrypto!", &base.clone().with_parallelism(0)),
        raw(b"Hi CatCrypto!", &base.with_parallelism(1))
    );
}

#[test]
fn degenerate_output_lengths_still_produce_digests() {
    let base = Argon2Options::default().with_memory(64).with_iterations(1);
    assert_eq!(raw(b"Hi CatCrypto!", &base.clone().with_output_len(0)).len(), 4);
    assert_eq!(raw(b"Hi CatCrypto!", &base.clone().with_output_len(-1)).len(), 4);
    assert_eq!(
        raw(b"Hi CatCrypto!", &base.with_output_len(i64::from(u32::MAX) + 1)).len(),
        1024
    );
}

#[test]
fn oversized_iterations_still_hash() {
    let base = Argon2Options::default().with_memory(64);
    let digest = raw(b"Hi CatCrypto!", &base.clone().with_iterations(2 << 33));

    assert_eq!(digest.len(), 32);
    assert_eq!(
        digest,
        raw(b"Hi CatCrypto!", &base.with_iterations(i64::from(MAX_TIME_COST)))
    );
}

#[test]
fn oversized_memory_still_hashes() {
    let options = Argon2Options::default()
        .with_memory(2 << 33)
        .with_iterations(1)
        .with_parallelism(4);

    let params = Argon2Params::from_options(&options).unwrap();
    assert_eq!(params.memory_cost(), MAX_MEMORY_COST);
    assert_eq!(params.memory_blocks() % 16, 0);

    assert_eq!(raw(b"Hi CatCrypto!", &options).len(), 32);
}

#[test]
fn oversized_parallelism_still_hashes() {
    let options = Argon2Options::default()
        .with_parallelism(2 << 32)
        .with_iterations(1);

    let params = Argon2Params::from_options(&options).unwrap();
    assert_eq!(params.parallelism(), MAX_PARALLELISM);
    assert_eq!(params.memory_blocks() % (4 * MAX_PARALLELISM), 0);

    assert_eq!(raw(b"Hi CatCrypto!", &options).len(), 32);
}

#[test]
fn oversized_output_length_still_hashes() {
    let options = Argon2Options::default()
        .with_memory(64)
        .with_iterations(1)
        .with_output_len(2 << 33);

    assert_eq!(raw(b"Hi CatCrypto!", &options).len(), 1024);
}

#[test]
fn memory_not_multiple_of_lanes_is_rounded_down() {
    // Same block count, different memory cost hashed into H0
    let base = small(Argon2Mode::Argon2id).with_iterations(1);
    let params = Argon2Params::from_options(&base.clone().with_memory(35)).unwrap();
    assert_eq!(params.memory_blocks(), 32);
    assert_ne!(raw(b"password", &base.clone().with_memory(35)), raw(b"password", &base));
}

#[test]
fn empty_salt_fails() {
    let options = Argon2Options::default().with_salt("");
    assert_eq!(hash(b"Hi CatCrypto!", &options), Err(Argon2Error::InvalidSalt));
}

#[test]
fn short_salt_rejected_for_encoded_output_only() {
    let options = Argon2Options::default().with_memory(64).with_salt("salt");
    assert!(hash(b"password", &options).is_ok());

    let encoded = options.with_encoding(OutputEncoding::Encoded);
    assert_eq!(hash(b"password", &encoded), Err(Argon2Error::InvalidSalt));
}

#[test]
fn hash_raw_matches_hash() {
    let options = small(Argon2Mode::Argon2i);
    let params = Argon2Params::from_options(&options).unwrap();
    assert_eq!(hash_raw(b"password", &params).unwrap(), raw(b"password", &options));
}

/// Recommended OWASP parameters (2024), single lane
#[test]
fn argon2id_recommended_params() {
    let options = Argon2Options::default()
        .with_mode(Argon2Mode::Argon2id)
        .with_memory(19456)
        .with_iterations(2)
        .with_salt("random_salt_16_b");

    assert_eq!(raw(b"my_secure_password", &options).len(), 32);
}
