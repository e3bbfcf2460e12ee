use std::{env, fs, process};

use rawinflate::deflate::{inflate_with_options, InflateOptions};

fn print_usage(progname: &str) {
  println!("Usage: {} <deflate-in> <outfilename> [options.json]", progname);
  println!(
    r#"    Decompresses raw DEFLATE data (no zlib or gzip framing) into <outfilename>.
    [options.json] may set any of "window_size", "strict_distances" and
    "reject_trailing_data". Set RUST_LOG=debug for a per-block trace."#
  );
}

fn read_options(path: Option<&String>) -> InflateOptions {
  let path = match path {
    Some(p) => p,
    None => return InflateOptions::default(),
  };
  let text = fs::read_to_string(path).unwrap_or_else(|e| {
    eprintln!("Could not read options file {}: {}", path, e);
    process::exit(1);
  });
  serde_json::from_str(&text).unwrap_or_else(|e| {
    eprintln!("Invalid options in {}: {}", path, e);
    process::exit(1);
  })
}

fn main() {
  let args: Vec<String> = env::args().collect();

  if args.len() < 3 || args.len() > 4 {
    print_usage(&args[0]);
    process::exit(1);
  }

  pretty_env_logger::init();

  let options = read_options(args.get(3));
  log::info!("Inflating with {:?}", options);

  let infile = fs::File::open(&args[1]).unwrap_or_else(|e| {
    eprintln!("Could not open input file {}: {}", args[1], e);
    process::exit(1);
  });

  let stream = match inflate_with_options(std::io::BufReader::new(infile), options) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Decompression failed: {}", e);
      process::exit(1);
    }
  };

  print!("{}", stream);
  let decoded = stream.into_byte_stream();
  if let Err(e) = fs::write(&args[2], &decoded) {
    eprintln!("Could not write {}: {}", args[2], e);
    process::exit(1);
  }
  println!("Wrote {} bytes to {}", decoded.len(), args[2]);
}
