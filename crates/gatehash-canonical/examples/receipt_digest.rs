use gatehash_canonical::{Canonicalizer, DigestFn, ParseLimits, Sha256Digest, StructuredValue};

fn main() {
    let receipt = br#"{
        "timestamp": "2024-03-15T10:00:00Z",
        "action": "generate_avatar",
        "cost": 0.05
    }"#;

    let value = match StructuredValue::parse(receipt, &ParseLimits::default()) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("receipt is malformed: {}", err);
            std::process::exit(1);
        }
    };

    let canonical = Canonicalizer::default().canonicalize(&value);
    println!("{}", canonical);
    println!("{}", Sha256Digest.digest(canonical.as_bytes()));
}
