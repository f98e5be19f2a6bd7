fn main() {
    println!("cargo:rerun-if-changed=protobuf/gtfs-realtime.proto");
    prost_build::Config::new()
        .compile_protos(&["protobuf/gtfs-realtime.proto"], &["protobuf/"])
        .expect("failed to compile gtfs-realtime.proto");
}
