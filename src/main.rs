use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // 日志时间戳
use env_logger::{Env, Target};
use std::io::Write; // env_logger 自定义格式
use std::sync::Arc;

use postboard_backend::{
    config::Config,
    database::create_store,
    external::{SmtpMailer, StripeService},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
    tasks::MailQueue,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // .env 可选，需在日志初始化读取 RUST_LOG 之前加载
    let dotenv_result = dotenvy::dotenv();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    if let Err(e) = dotenv_result
        && !e.not_found()
    {
        log::warn!("Failed to load .env file: {e}");
    }

    let config = Config::from_toml()?;

    let store = create_store(&config.database).await?;

    // 外部服务
    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
    let stripe_service = Arc::new(StripeService::new(config.stripe.clone()));
    let mail_queue = MailQueue::spawn(mailer.clone());

    let post_service = PostService::new(store.clone());
    let user_service = UserService::new(store.clone());
    let otp_service = OtpService::new(
        Arc::new(MemoryOtpStore::new()),
        mailer,
        config.otp.ttl_seconds,
    );
    let subscription_service = SubscriptionService::new(stripe_service, mail_queue);

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&cors_config))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(otp_service.clone()))
            .app_data(web::Data::new(subscription_service.clone()))
            .configure(swagger_config)
            .configure(handlers::routes)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
