use rand::{distributions::Alphanumeric, Rng};

/// Creates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}
