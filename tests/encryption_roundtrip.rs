use std::fs;

use tempfile::tempdir;

use bfile::{BfileError, VerifyPolicy};

#[test]
fn hello_world_container_layout() {
    // 11 字节明文填充为一个 16 字节分组，容器总长 60 + 16。
    let container = bfile::encrypt(b"hello world", "strings/english.lang").expect("encrypt");
    assert_eq!(container.len(), 76);

    let decrypted = bfile::decrypt(&container, "strings/english.lang").expect("decrypt");
    assert_eq!(decrypted.plaintext, b"hello world");
    assert!(decrypted.verified);
}

#[test]
fn empty_plaintext_roundtrip() {
    // 空明文产生一整块填充。
    let container = bfile::encrypt(b"", "strings/english.lang").expect("encrypt");
    assert_eq!(container.len(), 60 + 16);

    let decrypted = bfile::decrypt(&container, "strings/english.lang").expect("decrypt");
    assert!(decrypted.plaintext.is_empty());
    assert!(decrypted.verified);
}

#[test]
fn block_aligned_plaintext_gets_extra_block() {
    let container = bfile::encrypt(&[0x5A; 32], "a").expect("encrypt");
    assert_eq!(container.len(), 60 + 48);
}

#[test]
fn empty_internal_path_is_accepted() {
    let container = bfile::encrypt(b"payload", "").expect("encrypt");
    let decrypted = bfile::decrypt(&container, "").expect("decrypt");
    assert_eq!(decrypted.plaintext, b"payload");
    assert!(decrypted.verified);
}

#[test]
fn encryption_is_randomized() {
    let a = bfile::encrypt(b"same input", "same/path").expect("encrypt a");
    let b = bfile::encrypt(b"same input", "same/path").expect("encrypt b");

    assert_ne!(a, b);
    // salt 与 IV 都是新生成的
    assert_ne!(a[..12], b[..12]);
    assert_ne!(a[12..28], b[12..28]);

    for container in [&a, &b] {
        let decrypted = bfile::decrypt(container, "same/path").expect("decrypt");
        assert_eq!(decrypted.plaintext, b"same input");
        assert!(decrypted.verified);
    }
}

#[test]
fn wrong_internal_path_is_not_verified() {
    let container = bfile::encrypt(b"secret asset data", "strings/english.lang").expect("encrypt");

    // 错误路径派生出另一把密钥：要么填充失效，要么 HMAC 失败
    match bfile::decrypt(&container, "strings/french.lang") {
        Ok(decrypted) => {
            assert!(!decrypted.verified);
            assert_ne!(decrypted.plaintext, b"secret asset data");
        }
        Err(err) => assert!(matches!(err, BfileError::Padding)),
    }
}

#[test]
fn wrong_internal_path_fails_in_strict_mode() {
    let container = bfile::encrypt(b"secret asset data", "strings/english.lang").expect("encrypt");

    let result =
        bfile::decrypt_with_policy(&container, "strings/french.lang", VerifyPolicy::Strict);
    assert!(matches!(result, Err(BfileError::MacMismatch)));
}

#[test]
fn tampered_mac_warns_but_still_decrypts() {
    let mut container = bfile::encrypt(b"hello world", "strings/english.lang").expect("encrypt");
    let last = container.len() - 1;
    container[last] ^= 0x01;

    let decrypted = bfile::decrypt(&container, "strings/english.lang").expect("decrypt");
    assert!(!decrypted.verified);
    // 密文未动，明文仍然正确
    assert_eq!(decrypted.plaintext, b"hello world");
}

#[test]
fn tampered_ciphertext_is_not_verified() {
    // 64 字节明文 => 80 字节密文；改动第一个分组只影响前两个明文分组，填充保持有效
    let plaintext = [0x42u8; 64];
    let mut container = bfile::encrypt(&plaintext, "maps/e1m1.map").expect("encrypt");
    container[28] ^= 0x80;

    let decrypted = bfile::decrypt(&container, "maps/e1m1.map").expect("decrypt");
    assert!(!decrypted.verified);
    assert_ne!(decrypted.plaintext, plaintext);
    assert_eq!(decrypted.plaintext.len(), plaintext.len());
}

#[test]
fn tampered_salt_or_iv_is_not_verified() {
    let container = bfile::encrypt(b"hello world", "strings/english.lang").expect("encrypt");

    for offset in [0usize, 11, 12, 27] {
        let mut tampered = container.clone();
        tampered[offset] ^= 0x04;

        let result =
            bfile::decrypt_with_policy(&tampered, "strings/english.lang", VerifyPolicy::Strict);
        assert!(
            matches!(result, Err(BfileError::MacMismatch)),
            "offset {offset} not detected"
        );
    }
}

#[test]
fn short_container_is_format_error() {
    for len in [0usize, 1, 28, 59] {
        let result = bfile::decrypt(&vec![0u8; len], "strings/english.lang");
        assert!(matches!(result, Err(BfileError::Format(_))), "len {len}");
    }
}

#[test]
fn non_block_ciphertext_is_format_error() {
    assert!(matches!(
        bfile::decrypt(&[0u8; 60], "x"),
        Err(BfileError::Format(_))
    ));
    assert!(matches!(
        bfile::decrypt(&[0u8; 60 + 20], "x"),
        Err(BfileError::Format(_))
    ));
}

#[test]
fn encrypt_decrypt_file_roundtrip() {
    let temp_dir = tempdir().expect("create temp dir");
    let input_path = temp_dir.path().join("english.lang");
    let encrypted_path = temp_dir.path().join("english.bfile");
    let decrypted_path = temp_dir.path().join("english.lang.dec");

    let plaintext = b"#str_swf_hello = \"Hello\"\n";
    fs::write(&input_path, plaintext).expect("write plaintext");

    bfile::encrypt_file(&input_path, &encrypted_path, "strings/english.lang")
        .expect("encrypt file");
    assert_eq!(
        fs::metadata(&encrypted_path).expect("stat").len() as usize,
        60 + 32
    );

    let verified = bfile::decrypt_file(
        &encrypted_path,
        &decrypted_path,
        "strings/english.lang",
        VerifyPolicy::Warn,
    )
    .expect("decrypt file");

    assert!(verified);
    assert_eq!(fs::read(&decrypted_path).expect("read decrypted"), plaintext);
}

#[test]
fn failed_decrypt_writes_no_output() {
    let temp_dir = tempdir().expect("create temp dir");
    let bad_path = temp_dir.path().join("bad.bfile");
    let output_path = temp_dir.path().join("bad.bfile.dec");

    fs::write(&bad_path, b"not a bfile container").expect("write bad file");

    let result = bfile::decrypt_file(&bad_path, &output_path, "x", VerifyPolicy::Warn);
    assert!(matches!(result, Err(BfileError::Format(_))));
    assert!(!output_path.exists());
}

#[test]
fn strict_mac_failure_writes_no_output() {
    let temp_dir = tempdir().expect("create temp dir");
    let encrypted_path = temp_dir.path().join("english.bfile");
    let output_path = temp_dir.path().join("english.bfile.dec");

    let mut container = bfile::encrypt(b"hello world", "strings/english.lang").expect("encrypt");
    let last = container.len() - 1;
    container[last] ^= 0xFF;
    fs::write(&encrypted_path, &container).expect("write container");

    let result = bfile::decrypt_file(
        &encrypted_path,
        &output_path,
        "strings/english.lang",
        VerifyPolicy::Strict,
    );
    assert!(matches!(result, Err(BfileError::MacMismatch)));
    assert!(!output_path.exists());
}
