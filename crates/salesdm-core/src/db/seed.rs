//! Built-in sample catalog

use super::{Database, NewProduct};
use crate::error::Result;

/// Sample electronics catalog used to bootstrap an empty database
pub fn default_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct::new(
            "گوشی سامسونگ گلکسی S24",
            "گوشی هوشمند سامسونگ با صفحه نمایش ۶.۲ اینچ، حافظه ۲۵۶ گیگابایت و دوربین ۵۰ مگاپیکسل",
            52_000_000.0,
        ),
        NewProduct::new(
            "گوشی سامسونگ گلکسی A55",
            "گوشی میان‌رده سامسونگ با باتری ۵۰۰۰ میلی‌آمپر ساعت و حافظه ۱۲۸ گیگابایت",
            21_500_000.0,
        ),
        NewProduct::new(
            "گوشی اپل آیفون 15",
            "آیفون ۱۵ با تراشه A16 و حافظه ۱۲۸ گیگابایت",
            68_000_000.0,
        ),
        NewProduct::new(
            "گوشی شیائومی ردمی نوت 13",
            "گوشی اقتصادی شیائومی با صفحه نمایش AMOLED و شارژ سریع ۳۳ وات",
            11_900_000.0,
        ),
        NewProduct::new(
            "لپ تاپ ایسوس ویووبوک 15",
            "لپ تاپ ۱۵.۶ اینچی با پردازنده Core i5 و رم ۱۶ گیگابایت",
            38_000_000.0,
        ),
        NewProduct::new(
            "لپ تاپ اپل مک بوک ایر M2",
            "لپ تاپ سبک اپل با تراشه M2 و حافظه SSD ۲۵۶ گیگابایت",
            75_000_000.0,
        ),
        NewProduct::new(
            "هدفون بی‌سیم سونی WH-1000XM5",
            "هدفون بلوتوثی با حذف نویز فعال و ۳۰ ساعت شارژدهی",
            18_500_000.0,
        ),
        NewProduct::new(
            "ایرپاد پرو اپل نسل دوم",
            "هندزفری بی‌سیم اپل با حذف نویز و کیس شارژ MagSafe",
            14_200_000.0,
        ),
        NewProduct::new(
            "ساعت هوشمند سامسونگ گلکسی واچ 6",
            "ساعت هوشمند با سنسور ضربان قلب و ردیابی خواب",
            12_800_000.0,
        ),
        NewProduct::new(
            "تبلت سامسونگ گلکسی تب S9 FE",
            "تبلت ۱۰.۹ اینچی سامسونگ با قلم S Pen",
            24_000_000.0,
        ),
        NewProduct::new(
            "شارژر فست سامسونگ 25 وات",
            "شارژر دیواری با پورت USB-C و پشتیبانی از شارژ سریع",
            950_000.0,
        ),
        NewProduct::new(
            "پاوربانک انکر 20000",
            "پاوربانک ۲۰۰۰۰ میلی‌آمپر ساعت با دو خروجی USB",
            2_300_000.0,
        ),
    ]
}

impl Database {
    /// Insert the sample catalog if the product table is empty.
    ///
    /// Returns the number of products inserted (0 when the catalog already
    /// has data).
    pub fn seed_default_catalog(&mut self) -> Result<usize> {
        if self.count_products()? > 0 {
            return Ok(0);
        }
        let inserted = self.insert_products(&default_catalog())?;
        tracing::info!("Seeded catalog with {} sample products", inserted);
        Ok(inserted)
    }
}
