use dugout_yew::App;

fn main() {
    dugout_yew::logging::init();

    tracing::info!("Starting Dugout detail view");

    yew::Renderer::<App>::new().render();
}
