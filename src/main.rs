use std::thread;

use sync_lib::once::lazy::Lazy;
use sync_lib::singleton;

#[derive(Debug)]
struct Settings {
    greeting: &'static str,
    threads: usize,
}

singleton!(SETTINGS: Settings = {
    println!("constructing Settings (should print once)");
    Settings {
        greeting: "observed instance at",
        threads: 100,
    }
});

fn main() {
    println!("\n[Singleton]\n");

    println!("{:?}", Lazy::get(&SETTINGS));

    let handles: Vec<_> = (0..100)
        .map(|_| {
            thread::spawn(|| {
                let instance = Lazy::force(&SETTINGS);
                println!("{} {:p}", instance.greeting, instance);
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }

    println!("{:?}", Lazy::get(&SETTINGS));
    assert_eq!(SETTINGS.threads, 100);

    // let cell = sync_lib::once::cell::OnceCell::new();
    // println!("{:?}", cell.set(5));
    // println!("{:?}", cell.set(6));
    // println!("{:?}", cell);
}
