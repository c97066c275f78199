//! Purchase and person schemas with generated values.

use ironwire_codec::RecordValue;
use ironwire_core::IntegerType;
use ironwire_schema::{FieldKind, SchemaError, SchemaHandle, SchemaRegistry};

/// Registry holding the sample schemas.
#[derive(Debug)]
pub struct Fixtures {
    /// Registry with `Purchase`, `Person` and `Tick` defined.
    pub registry: SchemaRegistry,
    /// Handle of `Purchase`: three strings and a `u32` price.
    pub purchase: SchemaHandle,
    /// Handle of `Person`: three strings and a sequence of purchases.
    pub person: SchemaHandle,
    /// Handle of `Tick`: integers only, fixed size.
    pub tick: SchemaHandle,
}

impl Fixtures {
    /// Defines the sample schemas in a fresh registry.
    ///
    /// # Errors
    /// Returns a schema error if a definition is rejected.
    pub fn new() -> Result<Self, SchemaError> {
        let mut registry = SchemaRegistry::new();
        let purchase = registry
            .builder("Purchase")
            .string("purchase_id")
            .string("name")
            .integer("price", IntegerType::U32)
            .string("date")
            .define()?;
        let person = registry
            .builder("Person")
            .string("person_id")
            .string("first_name")
            .string("last_name")
            .sequence("purchases", FieldKind::Record(purchase))
            .define()?;
        let tick = registry
            .builder("Tick")
            .integer("instrument", IntegerType::U32)
            .integer("price", IntegerType::I64)
            .integer("quantity", IntegerType::U64)
            .integer("timestamp", IntegerType::U64)
            .define()?;
        Ok(Self {
            registry,
            purchase,
            person,
            tick,
        })
    }
}

/// Builds the `n`th sample purchase.
#[must_use]
pub fn purchase(n: u32) -> RecordValue {
    RecordValue::new()
        .with("purchase_id", format!("ord-{n:06}"))
        .with("name", if n % 2 == 0 { "laptop" } else { "headphones" })
        .with("price", 100 + n % 900)
        .with("date", "2022-01-25T02:20:42.832Z")
}

/// Builds a person with `purchases` purchases.
#[must_use]
pub fn person(purchases: u32) -> RecordValue {
    let items: Vec<RecordValue> = (0..purchases).map(purchase).collect();
    RecordValue::new()
        .with("person_id", "usr-abc123")
        .with("first_name", "John")
        .with("last_name", "Doe")
        .with("purchases", items)
}

/// Builds a sample tick.
#[must_use]
pub fn tick(n: u64) -> RecordValue {
    RecordValue::new()
        .with("instrument", 42u32)
        .with("price", -1_250_000i64 + n as i64)
        .with("quantity", 100 + n)
        .with("timestamp", 1_643_077_242_832_000_000u64 + n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwire_codec::Codec;

    #[test]
    fn test_fixtures_encode() {
        let fixtures = Fixtures::new().expect("fixtures");
        let codec = Codec::new(&fixtures.registry);

        let bytes = codec.serialize(fixtures.tick, &tick(1)).expect("tick");
        assert_eq!(
            fixtures.registry.get(fixtures.tick).and_then(|s| s.fixed_size()),
            Some(bytes.len())
        );

        let bytes = codec.serialize(fixtures.person, &person(3)).expect("person");
        assert_eq!(
            codec.deserialize(fixtures.person, &bytes).expect("decode"),
            person(3)
        );
    }
}
