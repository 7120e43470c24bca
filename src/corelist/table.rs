//! Static first-bundled-release data.
//!
//! Each module maps to entries sorted ascending by module version: the
//! module version a release shipped, and the first perl release carrying at
//! least that version. A single `("0", ...)` entry means the bundled version
//! never mattered for auditing purposes.

pub(super) const CORE_MODULES: &[(&str, &[(&str, &str)])] = &[
    ("AutoLoader", &[("0", "5.000")]),
    ("B", &[("0", "5.005")]),
    ("B::Deparse", &[("0", "5.005")]),
    ("Benchmark", &[("0", "5.000")]),
    ("Carp", &[("0", "5.000"), ("1.01", "5.008"), ("1.26", "5.016")]),
    ("Config", &[("0", "5.000")]),
    ("Cwd", &[("0", "5.000"), ("3.12", "5.008008")]),
    ("Data::Dumper", &[("0", "5.005"), ("2.121", "5.008008")]),
    ("DB_File", &[("0", "5.000")]),
    ("Digest::MD5", &[("0", "5.007003"), ("2.36", "5.008008")]),
    ("Digest::SHA", &[("0", "5.009003")]),
    ("DynaLoader", &[("0", "5.000")]),
    ("Encode", &[("0", "5.007003"), ("2.12", "5.008008")]),
    ("English", &[("0", "5.000")]),
    ("Errno", &[("0", "5.005")]),
    ("Exporter", &[("0", "5.000"), ("5.58", "5.008003")]),
    ("ExtUtils::MakeMaker", &[("0", "5.000"), ("6.30", "5.008008")]),
    ("Fcntl", &[("0", "5.000")]),
    ("File::Basename", &[("0", "5.000")]),
    ("File::Compare", &[("0", "5.004")]),
    ("File::Copy", &[("0", "5.002")]),
    ("File::Find", &[("0", "5.000")]),
    ("File::Glob", &[("0", "5.006")]),
    ("File::Path", &[("0", "5.001"), ("2.07", "5.010")]),
    ("File::Spec", &[("0", "5.004005"), ("3.12", "5.008008")]),
    ("File::Temp", &[("0", "5.006001"), ("0.18", "5.008009"), ("0.22", "5.010001")]),
    ("FileHandle", &[("0", "5.000")]),
    ("FindBin", &[("0", "5.00307")]),
    ("Getopt::Long", &[("0", "5.000"), ("2.35", "5.008008")]),
    ("Getopt::Std", &[("0", "5.000")]),
    ("Hash::Util", &[("0", "5.008")]),
    ("IO", &[("0", "5.00307")]),
    ("IO::File", &[("0", "5.00307")]),
    ("IO::Handle", &[("0", "5.00307")]),
    ("IO::Pipe", &[("0", "5.00307")]),
    ("IO::Select", &[("0", "5.00307")]),
    ("IO::Socket", &[("0", "5.00307")]),
    ("IO::Socket::INET", &[("0", "5.00405")]),
    ("IPC::Open2", &[("0", "5.000")]),
    ("IPC::Open3", &[("0", "5.000")]),
    ("JSON::PP", &[("0", "5.013009")]),
    ("List::Util", &[("0", "5.007003"), ("1.19", "5.009005"), ("1.29", "5.016")]),
    ("MIME::Base64", &[("0", "5.007003")]),
    ("Module::CoreList", &[("0", "5.008009")]),
    ("NDBM_File", &[("0", "5.000")]),
    ("Net::Ping", &[("0", "5.002")]),
    ("POSIX", &[("0", "5.000")]),
    ("Pod::Text", &[("0", "5.000")]),
    ("Pod::Usage", &[("0", "5.006")]),
    ("Safe", &[("0", "5.002")]),
    ("Scalar::Util", &[("0", "5.007003"), ("1.19", "5.009005")]),
    ("SelfLoader", &[("0", "5.000")]),
    ("Socket", &[("0", "5.000")]),
    ("Storable", &[("0", "5.007003"), ("2.15", "5.008008")]),
    ("Symbol", &[("0", "5.000")]),
    ("Sys::Hostname", &[("0", "5.000")]),
    ("Term::ANSIColor", &[("0", "5.006")]),
    ("Term::ReadLine", &[("0", "5.000")]),
    ("Test", &[("0", "5.004005")]),
    ("Test::Builder", &[("0", "5.006002")]),
    ("Test::Harness", &[("0", "5.000"), ("2.56", "5.008008"), ("3.17", "5.010001")]),
    ("Test::More", &[("0", "5.006002"), ("0.62", "5.008008"), ("0.92", "5.010001")]),
    ("Test::Simple", &[("0", "5.006002")]),
    ("Text::ParseWords", &[("0", "5.000")]),
    ("Text::Tabs", &[("0", "5.000")]),
    ("Text::Wrap", &[("0", "5.000")]),
    ("Tie::Array", &[("0", "5.005")]),
    ("Tie::Hash", &[("0", "5.000")]),
    ("Time::HiRes", &[("0", "5.007003"), ("1.86", "5.008008"), ("1.9711", "5.010001")]),
    ("Time::Local", &[("0", "5.000")]),
    ("Time::Piece", &[("0", "5.009005")]),
    ("Unicode::Normalize", &[("0", "5.008")]),
    ("XSLoader", &[("0", "5.006")]),
    // Pragmas
    ("attributes", &[("0", "5.006")]),
    ("autodie", &[("0", "5.010001")]),
    ("base", &[("0", "5.004005")]),
    ("bigint", &[("0", "5.008")]),
    ("bytes", &[("0", "5.006")]),
    ("charnames", &[("0", "5.006")]),
    ("constant", &[("0", "5.004"), ("1.17", "5.010001")]),
    ("diagnostics", &[("0", "5.000")]),
    ("feature", &[("0", "5.009005")]),
    ("fields", &[("0", "5.005")]),
    ("integer", &[("0", "5.000")]),
    ("lib", &[("0", "5.001")]),
    ("mro", &[("0", "5.009005")]),
    ("overload", &[("0", "5.000")]),
    ("parent", &[("0", "5.010001")]),
    ("strict", &[("0", "5.000")]),
    ("subs", &[("0", "5.000")]),
    ("threads", &[("0", "5.008")]),
    ("utf8", &[("0", "5.006")]),
    ("vars", &[("0", "5.000")]),
    ("version", &[("0", "5.009")]),
    ("warnings", &[("0", "5.006")]),
];
