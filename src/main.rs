fn main() {
    let _ = dotenvy::dotenv();
    shooting_range::game::run();
}
