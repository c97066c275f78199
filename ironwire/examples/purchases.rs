//! Round-trips a person and their purchases through the codec.
//!
//! Run with: `RUST_LOG=debug cargo run --example purchases`

use ironwire::prelude::*;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
struct Purchase {
    purchase_id: String,
    name: String,
    price: u32,
    date: String,
}

impl ToRecord for Purchase {
    fn to_record(&self) -> RecordValue {
        RecordValue::new()
            .with("purchase_id", self.purchase_id.as_str())
            .with("name", self.name.as_str())
            .with("price", self.price)
            .with("date", self.date.as_str())
    }
}

impl FromRecord for Purchase {
    fn from_record(mut record: RecordValue) -> Result<Self, CodecError> {
        Ok(Self {
            purchase_id: record.take("purchase_id")?,
            name: record.take("name")?,
            price: record.take("price")?,
            date: record.take("date")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Person {
    person_id: String,
    first_name: String,
    last_name: String,
    purchases: Vec<Purchase>,
}

impl ToRecord for Person {
    fn to_record(&self) -> RecordValue {
        let purchases: Vec<RecordValue> = self.purchases.iter().map(ToRecord::to_record).collect();
        RecordValue::new()
            .with("person_id", self.person_id.as_str())
            .with("first_name", self.first_name.as_str())
            .with("last_name", self.last_name.as_str())
            .with("purchases", purchases)
    }
}

impl FromRecord for Person {
    fn from_record(mut record: RecordValue) -> Result<Self, CodecError> {
        Ok(Self {
            person_id: record.take("person_id")?,
            first_name: record.take("first_name")?,
            last_name: record.take("last_name")?,
            purchases: record.take_records("purchases")?,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut registry = SchemaRegistry::new();
    let purchase_schema = registry
        .builder("Purchase")
        .string("purchase_id")
        .string("name")
        .integer("price", IntegerType::U32)
        .string("date")
        .define()?;
    let person_schema = registry
        .builder("Person")
        .string("person_id")
        .string("first_name")
        .string("last_name")
        .sequence("purchases", FieldKind::Record(purchase_schema))
        .define()?;

    let laptop = Purchase {
        purchase_id: "ord-zzz987".to_string(),
        name: "laptop".to_string(),
        price: 853,
        date: "2022-01-25T02:20:42.832Z".to_string(),
    };
    let headphones = Purchase {
        purchase_id: "ord-yyy654".to_string(),
        name: "headphones".to_string(),
        price: 63,
        date: "2022-01-23T14:12:05.631Z".to_string(),
    };
    let person = Person {
        person_id: "usr-abc123".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        purchases: vec![laptop.clone(), headphones],
    };

    let codec = Codec::new(&registry);

    let bytes = codec.encode(purchase_schema, &laptop)?;
    info!("Purchase {} encoded to {} bytes", laptop.to_record(), bytes.len());
    let decoded: Purchase = codec.decode(purchase_schema, &bytes)?;
    info!("Purchase decoded: {:?}", decoded);

    let bytes = codec.encode(person_schema, &person)?;
    info!("Person encoded to {} bytes: {:02x?}", bytes.len(), bytes);
    let decoded: Person = codec.decode(person_schema, &bytes)?;
    info!(
        "Person decoded with purchases {:?}",
        decoded.purchases.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
    );

    if decoded != person {
        return Err("person did not survive the round trip".into());
    }
    Ok(())
}
