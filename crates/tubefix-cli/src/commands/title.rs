use tubefix_core::generate_title;
use tubefix_core::matcher::matching_marker;

pub fn handle(filenames: &[String]) {
    for filename in filenames {
        println!("{}", filename);
        match matching_marker(filename) {
            Some(marker) => println!(
                "  matches \"{}\", would become: {}",
                marker,
                generate_title(filename)
            ),
            None => println!(
                "  clean title, left alone (generated: {})",
                generate_title(filename)
            ),
        }
    }
}
