use std::env;

use serde_json::json;

use crate::craft;
use crate::data::validate::{validate_craft, validate_medals, ValidationReport};
use crate::data::{self, Catalogs};
use crate::scoring::{damage_potential, ScoreOptions};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Score,
    Craft,
    Export,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("score") => Some(Command::Score),
        Some("craft") => Some(Command::Craft),
        Some("export") => Some(Command::Export),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Score) => handle_score(args),
        Some(Command::Craft) => handle_craft(args),
        Some(Command::Export) => handle_export(args),
        Some(Command::Validate) => handle_validate(),
        None => {
            eprintln!("usage: darkroad <serve|score|craft|export|validate>");
            2
        }
    }
}

fn parse_score_options(args: &[String]) -> ScoreOptions {
    ScoreOptions {
        include_general_attack_up: args.iter().any(|arg| arg == "--general"),
        include_attribute_attack_up: args.iter().any(|arg| arg == "--attribute"),
        include_supernova: args.iter().any(|arg| arg == "--supernova"),
    }
}

fn load_catalogs() -> Result<Catalogs, i32> {
    Catalogs::load_default().map_err(|err| {
        eprintln!("failed to load catalogs: {err}");
        1
    })
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("DARKROAD_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_score(args: &[String]) -> i32 {
    let Some(id) = args.get(2).and_then(|raw| raw.parse::<u32>().ok()) else {
        eprintln!("usage: darkroad score <medal-id> [--general] [--attribute] [--supernova]");
        return 2;
    };
    let options = parse_score_options(args);
    let catalogs = match load_catalogs() {
        Ok(catalogs) => catalogs,
        Err(code) => return code,
    };
    let Some(medal) = catalogs.medals.get(id) else {
        eprintln!("medal id {id} not found");
        return 1;
    };

    match damage_potential(medal, options) {
        Ok(score) => {
            let payload = json!({
                "medal_id": id,
                "name": medal.name,
                "options": options,
                "damage_potential": score,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).unwrap_or_default()
            );
            0
        }
        Err(err) => {
            eprintln!("score error: {err}");
            1
        }
    }
}

fn handle_craft(args: &[String]) -> i32 {
    let Some(id) = args.get(2).and_then(|raw| raw.parse::<u32>().ok()) else {
        eprintln!("usage: darkroad craft <accessory-id>");
        return 2;
    };
    let catalogs = match load_catalogs() {
        Ok(catalogs) => catalogs,
        Err(code) => return code,
    };
    let Some(accessory) = catalogs.craft.accessory(id) else {
        eprintln!("accessory id {id} not found");
        return 1;
    };

    let summary = match craft::aggregate(&catalogs.craft, id) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("craft error: {err}");
            return 1;
        }
    };
    let materials: Vec<_> = summary
        .material_totals
        .iter()
        .map(|(&material_id, &quantity)| {
            json!({
                "id": material_id,
                "name": catalogs.craft.material(material_id).map(|m| m.name.as_str()),
                "quantity": quantity,
            })
        })
        .collect();
    let accessories: Vec<_> = summary
        .accessory_totals
        .iter()
        .map(|(&accessory_id, &quantity)| {
            json!({
                "id": accessory_id,
                "name": catalogs.craft.accessory(accessory_id).map(|a| a.name.as_str()),
                "quantity": quantity,
            })
        })
        .collect();

    let payload = json!({
        "accessory_id": id,
        "name": accessory.name,
        "total_bp": summary.total_bp,
        "materials": materials,
        "accessories": accessories,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).unwrap_or_default()
    );
    0
}

fn handle_export(args: &[String]) -> i32 {
    let Some(out_path) = args.get(2) else {
        eprintln!("usage: darkroad export <out.csv> [--general] [--attribute] [--supernova]");
        return 2;
    };
    let options = parse_score_options(args);
    let catalogs = match load_catalogs() {
        Ok(catalogs) => catalogs,
        Err(code) => return code,
    };

    match write_score_table(out_path, &catalogs, options) {
        Ok(rows) => {
            println!("wrote {rows} medals to {out_path}");
            0
        }
        Err(err) => {
            eprintln!("export error: {err}");
            1
        }
    }
}

fn write_score_table(
    out_path: &str,
    catalogs: &Catalogs,
    options: ScoreOptions,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(out_path)?;
    writer.write_record([
        "id",
        "name",
        "rarity",
        "direction",
        "attribute",
        "strength",
        "defense",
        "damage_potential",
    ])?;

    let mut rows = 0;
    for medal in catalogs.medals.iter() {
        let score = damage_potential(medal, options)?;
        writer.write_record([
            medal.id.to_string(),
            medal.name.clone(),
            medal.rarity.to_string(),
            medal
                .direction
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            medal
                .attribute
                .map(|a| a.as_str().to_string())
                .unwrap_or_default(),
            medal.strength.to_string(),
            medal.defense.map(|d| d.to_string()).unwrap_or_default(),
            format!("{score:.2}"),
        ])?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

fn handle_validate() -> i32 {
    let dir = data::data_dir();
    let mut report = ValidationReport::default();

    match data::medal::load_medal_file(&dir.join(data::medal::MEDALS_FILE)) {
        Ok(file) => report.merge(validate_medals(&file.medals)),
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    }

    let accessories = match data::craft::load_accessory_file(&dir.join(data::craft::ACCESSORIES_FILE))
    {
        Ok(file) => file.accessories,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    let materials = match data::craft::load_material_file(&dir.join(data::craft::MATERIALS_FILE)) {
        Ok(file) => file.materials,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    report.merge(validate_craft(&accessories, &materials));

    for diag in &report.diagnostics {
        println!("{} {}: {}", diag.severity, diag.context, diag.message);
    }
    if report.has_errors() {
        eprintln!("validation failed");
        1
    } else {
        println!("validation passed ({} findings)", report.diagnostics.len());
        0
    }
}
