//! Rank the registration entities of a stored RDAP record.
//!
//! Run with: cargo run --example rank_entities --features lens-core

use chrono::{TimeZone, Utc};
use grip::lens::fields::FieldSelection;
use grip::lens::rdap::{RdapLens, RdapResponse, TimestampKind};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let payload = json!({
        "handle": "203.0.113.0 - 203.0.113.255",
        "name": "EXAMPLE-NET",
        "objectClassName": "ip network",
        "events": [{"eventAction": "registration", "eventDate": "2009-04-02T09:00:00Z"}],
        "entities": [{
            "handle": "ORG-EXAMPLE",
            "entities": [
                {
                    "handle": "ABUSE-EX",
                    "roles": ["abuse"],
                    "events": [
                        {"eventAction": "last changed", "eventDate": "2023-11-14T02:11:34Z"},
                        {"eventAction": "registration", "eventDate": "2018-07-05T05:28:00Z"}
                    ],
                    "vcardArray": ["vcard", [
                        ["fn", {}, "text", "Example Abuse"],
                        ["email", {}, "text", "abuse@example.net"]
                    ]]
                },
                {
                    "handle": "TECH-EX",
                    "roles": ["technical", "administrative"],
                    "events": [
                        {"eventAction": "last changed", "eventDate": "2021-02-01T00:00:00Z"},
                        {"eventAction": "registration", "eventDate": "2010-03-15T00:00:00Z"}
                    ]
                }
            ]
        }]
    });

    let record = RdapResponse::from_payload(payload)?.into_record("203.0.113.7")?;
    let lens = RdapLens::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

    let recent = lens.most_recent(&record, TimestampKind::LastChanged)?;
    println!("most recently changed: {:?}", recent.handle());

    let fields = FieldSelection::from_tokens("handle registration roles email");
    for entity in lens.entries(&record, TimestampKind::Registration, true)? {
        for (field, value) in lens.entry_rows(&entity, &fields)? {
            println!("{field:>14}: {value}");
        }
        println!();
    }

    Ok(())
}
