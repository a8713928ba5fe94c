fn main() {
    stepwise::app::cli::run();
}
