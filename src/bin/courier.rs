fn main() -> Result<(), Box<dyn std::error::Error>> {
    courier::app::run()
}
