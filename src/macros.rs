#![allow(unused_macros)]

/// Helper macro for reading locked items
///
/// ```rust, ignore
///  let data = read_lock!(instance.fields);
///  println!("{}", data.len());
/// ```
macro_rules! read_lock {
    ($rwlock:expr) => {
        $rwlock.read().expect("Failed to acquire read lock")
    };
}

/// Helper macro for writing to locked items
///
/// ```rust, ignore
///  let mut data = write_lock!(instance.fields);
///  data.insert("Name".to_string(), Value::Null);
/// ```
macro_rules! write_lock {
    ($rwlock:expr) => {
        $rwlock.write().expect("Failed to acquire write lock")
    };
}
