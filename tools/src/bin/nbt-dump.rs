use std::fs::File;
use std::io::Read;
use std::process::exit;

use anynbt::{read, ReadOptions, RootName};
use clap::{App, Arg};

//
// Decode NBT from a file or stdin, whatever its dialect, and dump the value
// tree. Framing flags left off are auto-detected and echoed to stderr.
//

fn main() {
    let matches = App::new("nbt-dump")
        .about("Decodes NBT in any dialect and dumps the value tree")
        .arg(Arg::with_name("file").help("input file; reads stdin when omitted"))
        .arg(
            Arg::with_name("endian")
                .long("endian")
                .takes_value(true)
                .help("big, little or little-varint; auto-detected when omitted"),
        )
        .arg(
            Arg::with_name("compression")
                .long("compression")
                .takes_value(true)
                .help("none, gzip, zlib or raw-deflate; auto-detected when omitted"),
        )
        .arg(
            Arg::with_name("root-name")
                .long("root-name")
                .takes_value(true)
                .help("'auto', 'none' for nameless streams, or the exact root name to require"),
        )
        .arg(
            Arg::with_name("bedrock-level")
                .long("bedrock-level")
                .takes_value(true)
                .possible_values(&["true", "false"])
                .help("whether an 8 byte level header precedes the root"),
        )
        .arg(
            Arg::with_name("lenient")
                .long("lenient")
                .help("allow trailing bytes after the root tag"),
        )
        .get_matches();

    let mut data = Vec::new();
    let input = match matches.value_of("file") {
        Some(path) => File::open(path).and_then(|mut f| f.read_to_end(&mut data)),
        None => std::io::stdin().read_to_end(&mut data),
    };
    if let Err(e) = input {
        eprintln!("failed to read input: {}", e);
        exit(1);
    }

    let mut options = ReadOptions::default();
    options.strict = !matches.is_present("lenient");
    if let Some(s) = matches.value_of("endian") {
        options.endian = Some(or_exit(s.parse()));
    }
    if let Some(s) = matches.value_of("compression") {
        options.compression = Some(or_exit(s.parse()));
    }
    match matches.value_of("root-name") {
        None | Some("auto") => {}
        Some("none") => options.root_name = Some(RootName::Nameless),
        Some(name) => options.root_name = Some(RootName::Exact(name.to_owned())),
    }
    if let Some(s) = matches.value_of("bedrock-level") {
        options.bedrock_level = Some(s == "true");
    }

    match read(&data, &options) {
        Ok(doc) => {
            eprintln!(
                "root name: {:?}, endian: {}, compression: {}, bedrock level: {}",
                doc.root_name, doc.endian, doc.compression, doc.bedrock_level
            );
            if !options.strict {
                eprintln!("read {} of {} bytes", doc.bytes_read, data.len());
            }
            println!("{:#?}", doc.root);
        }
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}

fn or_exit<T>(result: anynbt::error::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}
