use std::env;
use std::fs;
use std::path::PathBuf;

use dataset::{
    CategoryRegistry, EXPANSION_RNG_SEED, ExpandOptions, SeedGenOptions, TARGET_POINT_COUNT,
    expand_points, generate_seed_points, normalize_seed_points_str,
};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "gen-seed" => cmd_gen_seed(args),
        "expand" => cmd_expand(args),
        _ => Err(usage()),
    }
}

fn cmd_gen_seed(args: Vec<String>) -> Result<(), String> {
    // pointfield gen-seed <output.json> [--count N] [--seed N]
    if args.is_empty() {
        return Err(usage());
    }

    let output = PathBuf::from(&args[0]);
    let mut options = SeedGenOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                i += 1;
                if i >= args.len() {
                    return Err("--count requires a value".to_string());
                }
                options.count = args[i]
                    .parse::<usize>()
                    .map_err(|_| "--count must be an integer".to_string())?;
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("--seed requires a value".to_string());
                }
                options.rng_seed = args[i]
                    .parse::<u32>()
                    .map_err(|_| "--seed must be a 32-bit unsigned integer".to_string())?;
            }
            s => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let registry = CategoryRegistry::builtin();
    let points = generate_seed_points(&registry, &options);

    let mut payload =
        serde_json::to_string_pretty(&points).map_err(|e| format!("serialize: {e}"))?;
    payload.push('\n');
    fs::write(&output, &payload).map_err(|e| format!("write {output:?}: {e}"))?;

    let hash = blake3::hash(payload.as_bytes());
    eprintln!(
        "wrote {} ({} seed points, blake3={})",
        output.display(),
        points.len(),
        hash.to_hex()
    );
    Ok(())
}

fn cmd_expand(args: Vec<String>) -> Result<(), String> {
    // pointfield expand <seed.json> <output.json> [--target N] [--rng-seed N]
    if args.len() < 2 {
        return Err(usage());
    }

    let input = PathBuf::from(&args[0]);
    let output = PathBuf::from(&args[1]);
    let mut target = TARGET_POINT_COUNT;
    let mut rng_seed = EXPANSION_RNG_SEED;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--target" => {
                i += 1;
                if i >= args.len() {
                    return Err("--target requires a value".to_string());
                }
                target = args[i]
                    .parse::<usize>()
                    .map_err(|_| "--target must be an integer".to_string())?;
            }
            "--rng-seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("--rng-seed requires a value".to_string());
                }
                rng_seed = args[i]
                    .parse::<u32>()
                    .map_err(|_| "--rng-seed must be a 32-bit unsigned integer".to_string())?;
            }
            s => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let payload = fs::read_to_string(&input).map_err(|e| format!("read {input:?}: {e}"))?;

    let registry = CategoryRegistry::builtin();
    let mut options = ExpandOptions::new(target);
    options.rng_seed = rng_seed;

    let seed = normalize_seed_points_str(&payload, &registry, options.values)
        .map_err(|e| e.to_string())?;
    let collection = expand_points(&seed, &options).map_err(|e| e.to_string())?;

    let mut out_payload =
        serde_json::to_string(&collection).map_err(|e| format!("serialize: {e}"))?;
    out_payload.push('\n');
    fs::write(&output, &out_payload).map_err(|e| format!("write {output:?}: {e}"))?;

    let hash = blake3::hash(out_payload.as_bytes());
    eprintln!(
        "expanded {} seed points to {} (value domain {}..{}, blake3={})",
        seed.len(),
        collection.items.len(),
        collection.value_domain.min,
        collection.value_domain.max,
        hash.to_hex()
    );
    Ok(())
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "pointfield".to_string());
    format!(
        "Usage:\n  {exe} gen-seed <output.json> [--count N] [--seed N]\n  {exe} expand <seed.json> <output.json> [--target N] [--rng-seed N]\n\nNotes:\n- Output is deterministic: rerunning a command with the same seed reproduces the file bit for bit.\n- gen-seed drops id/category/value on a fixed cadence of records; normalization derives them back.\n- expand writes the full collection as compact JSON with the observed value domain attached.\n"
    )
}
