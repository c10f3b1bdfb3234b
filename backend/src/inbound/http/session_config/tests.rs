//! Unit tests for session key resolution.

use super::*;
use rstest::rstest;
use uuid::Uuid;

#[derive(Debug)]
struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'a'; len])?;
        Ok(Self { path })
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn settings(key_file: Option<PathBuf>, allow_ephemeral: bool) -> ServerSettings {
    ServerSettings {
        bind_addr: None,
        database_url: None,
        password_hash_cost: None,
        default_lng: None,
        default_lat: None,
        session_key_file: key_file,
        session_allow_ephemeral: allow_ephemeral,
        cookie_secure: None,
    }
}

fn missing_path() -> PathBuf {
    std::env::temp_dir().join(format!("missing-session-key-{}", Uuid::new_v4()))
}

#[rstest]
fn release_accepts_long_key_file() {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let resolved = session_settings(
        &settings(Some(key_file.path.clone()), false),
        BuildMode::Release,
    )
    .expect("release key should load");
    assert!(resolved.cookie_secure);
}

#[rstest]
fn same_key_file_derives_same_key() {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let config = settings(Some(key_file.path.clone()), false);
    let first = session_settings(&config, BuildMode::Release).expect("first");
    let second = session_settings(&config, BuildMode::Release).expect("second");
    assert_eq!(first.key.master(), second.key.master());
}

#[rstest]
#[case(BuildMode::Release, 63, SESSION_KEY_MIN_LEN)]
#[case(BuildMode::Debug, 16, SESSION_KEY_DERIVE_MIN_LEN)]
fn short_key_is_rejected(#[case] mode: BuildMode, #[case] len: usize, #[case] min: usize) {
    let key_file = TempKeyFile::new(len).expect("key file");
    let Err(err) = session_settings(&settings(Some(key_file.path.clone()), true), mode) else {
        panic!("short key should be rejected");
    };
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, min_len, .. } if length == len && min_len == min
    ));
}

#[rstest]
fn debug_accepts_shorter_key_file() {
    let key_file = TempKeyFile::new(SESSION_KEY_DERIVE_MIN_LEN).expect("key file");
    assert!(
        session_settings(&settings(Some(key_file.path.clone()), false), BuildMode::Debug).is_ok()
    );
}

#[rstest]
fn release_unreadable_key_is_rejected() {
    let Err(err) = session_settings(&settings(Some(missing_path()), false), BuildMode::Release)
    else {
        panic!("missing key file should be rejected");
    };
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_without_key_file_is_rejected() {
    let Err(err) = session_settings(&settings(None, false), BuildMode::Release) else {
        panic!("unconfigured key should be rejected");
    };
    assert!(matches!(err, SessionConfigError::MissingKeyFile));
}

#[rstest]
#[case(BuildMode::Debug, false, None)]
#[case(BuildMode::Debug, false, Some(missing_path()))]
#[case(BuildMode::Release, true, None)]
#[case(BuildMode::Release, true, Some(missing_path()))]
fn ephemeral_key_is_generated_when_allowed(
    #[case] mode: BuildMode,
    #[case] allow_ephemeral: bool,
    #[case] key_file: Option<PathBuf>,
) {
    assert!(session_settings(&settings(key_file, allow_ephemeral), mode).is_ok());
}

#[rstest]
#[case(None, true)]
#[case(Some(true), true)]
#[case(Some(false), false)]
fn cookie_secure_follows_settings(#[case] configured: Option<bool>, #[case] expected: bool) {
    let mut config = settings(None, true);
    config.cookie_secure = configured;
    let resolved = session_settings(&config, BuildMode::Debug).expect("debug settings");
    assert_eq!(resolved.cookie_secure, expected);
}
