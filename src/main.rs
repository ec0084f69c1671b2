fn main() {
    dragon_lair::game::run();
}
