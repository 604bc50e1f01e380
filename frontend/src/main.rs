fn main() {
    rollcall_frontend::start();
}
