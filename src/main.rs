fn main() {
  std::process::exit(trainer_desk_lib::run())
}
