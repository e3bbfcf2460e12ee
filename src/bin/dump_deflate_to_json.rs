use std::{env, fs, io::Write, process};

use rawinflate::deflate::inflate_with_options;

fn main() -> Result<(), std::io::Error> {
  let args: Vec<String> = env::args().collect();

  if args.len() != 3 {
    println!("Usage: {} <deflate-in> <json-out>", &args[0]);
    println!("\tDumps a JSON description of the blocks in a raw DEFLATE file for further examination");
    process::exit(1);
  }

  pretty_env_logger::init();

  let data = fs::read(&args[1])?;
  let stream = match inflate_with_options(&data[..], Default::default()) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Could not decode {}: {}", args[1], e);
      process::exit(1);
    }
  };

  let json_string = serde_json::to_string(&stream)?;
  let mut outfile = fs::File::create(&args[2])?;
  outfile.write_all(json_string.as_bytes())?;
  println!("Output written to {}", args[2]);

  Ok(())
}
