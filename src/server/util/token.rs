use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                         abcdefghijklmnopqrstuvwxyz\
                         0123456789";

/// Random string of `len` ASCII letters and digits from the thread-local CSPRNG.
pub fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
