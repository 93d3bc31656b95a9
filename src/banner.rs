// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
     _      _  __ _      _           _
  __| |_ __(_)/ _| |_ __| | ___  ___| | __
 / _` | '__| | |_| __/ _` |/ _ \/ __| |/ /
| (_| | |  | |  _| || (_| |  __/ (__|   <
 \__,_|_|  |_|_|  \__\__,_|\___|\___|_|\_\

    Model Drift Verdicts in Your Terminal
"#;
    println!("{}", banner);
}
