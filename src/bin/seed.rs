// src/bin/seed.rs
//
// Posts synthetic vehicles, parts, and maintenance events to a running
// instance over HTTP. Counts and target URL come from the environment:
// SEED_BASE_URL (default http://localhost:8000), SEED_VEHICLES (100),
// SEED_PARTS (50), SEED_EVENTS (100).

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

const OWNERS: &[&str] = &["John", "Alice", "Bob", "Charlie", "Eva"];
const BRANDS: &[&str] = &["Toyota", "BMW", "Audi", "Mercedes", "Ford"];
const APPEARANCES: &[&str] = &["Sedan", "SUV", "Coupe", "Hatchback", "Convertible"];
const PART_NAMES: &[&str] = &["Brake Pads", "Engine Oil", "Alternator", "Battery", "Tire"];
const CATEGORIES: &[&str] = &["Front", "Rear", "Left", "Right"];
const MANUFACTURERS: &[&str] = &["Bosch", "Magneti Marelli", "SKF", "Valeo", "Delphi"];
const MECHANICS: &[&str] = &["John", "Sam", "Tina", "Paul", "Rita"];

fn env_count(var: &str, default: u32) -> u32 {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let base_url =
        std::env::var("SEED_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let num_vehicles = env_count("SEED_VEHICLES", 100);
    let num_parts = env_count("SEED_PARTS", 50);
    let num_events = env_count("SEED_EVENTS", 100);

    let client = reqwest::Client::new();
    let today = Utc::now().date_naive();

    let mut vehicle_ids: Vec<i64> = Vec::with_capacity(num_vehicles as usize);
    for _ in 0..num_vehicles {
        let body = {
            let mut rng = rand::thread_rng();
            json!({
                "owner": OWNERS.choose(&mut rng).unwrap(),
                "brand": BRANDS.choose(&mut rng).unwrap(),
                "appearance": APPEARANCES.choose(&mut rng).unwrap(),
                "power": rng.gen_range(100..=400),
                "max_speed": rng.gen_range(180..=300),
                "created_at": (today - Duration::days(rng.gen_range(0..=365))).to_string(),
            })
        };
        let resp = client
            .post(format!("{}/vehicles", base_url))
            .json(&body)
            .send()
            .await?;
        if resp.status().is_success() {
            let payload: serde_json::Value = resp.json().await?;
            if let Some(id) = payload["data"]["vehicle"]["id"].as_i64() {
                vehicle_ids.push(id);
            }
            println!("Vehicle added: {}", body);
        } else {
            eprintln!("Failed to add vehicle: {}", resp.status());
        }
    }

    let mut part_ids: Vec<i64> = Vec::with_capacity(num_parts as usize);
    for _ in 0..num_parts {
        let body = {
            let mut rng = rand::thread_rng();
            json!({
                "name": PART_NAMES.choose(&mut rng).unwrap(),
                "category": CATEGORIES.choose(&mut rng).unwrap(),
                "manufacturer": MANUFACTURERS.choose(&mut rng).unwrap(),
                "price": rng.gen_range(20.0..500.0),
                // Guarantee from 1 to 5 years out.
                "guarantee_until": (today + Duration::days(rng.gen_range(365..=1825))).to_string(),
            })
        };
        let resp = client
            .post(format!("{}/parts", base_url))
            .json(&body)
            .send()
            .await?;
        if resp.status().is_success() {
            let payload: serde_json::Value = resp.json().await?;
            if let Some(id) = payload["data"]["part"]["id"].as_i64() {
                part_ids.push(id);
            }
            println!("Part added: {}", body);
        } else {
            eprintln!("Failed to add part: {}", resp.status());
        }
    }

    if vehicle_ids.is_empty() || part_ids.is_empty() {
        anyhow::bail!("cannot seed maintenance events without vehicles and parts");
    }

    for _ in 0..num_events {
        let body = {
            let mut rng = rand::thread_rng();
            json!({
                "vehicle_id": vehicle_ids.choose(&mut rng).unwrap(),
                "mechanic_name": MECHANICS.choose(&mut rng).unwrap(),
                "issue_date": (today - Duration::days(rng.gen_range(0..=365))).to_string(),
                "appearance_part_id": part_ids.choose(&mut rng).unwrap(),
                "max_speed_part_id": part_ids.choose(&mut rng).unwrap(),
                "power_part_id": part_ids.choose(&mut rng).unwrap(),
            })
        };
        let resp = client
            .post(format!("{}/maintenance-events", base_url))
            .json(&body)
            .send()
            .await?;
        if resp.status().is_success() {
            println!("Maintenance event added: {}", body);
        } else {
            eprintln!("Failed to add maintenance event: {}", resp.status());
        }
    }

    Ok(())
}
