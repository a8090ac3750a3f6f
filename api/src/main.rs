fn main() {
    creamcart_api::main();
}
