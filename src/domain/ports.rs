use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn students_file(&self) -> &str;
    fn teachers_file(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn json_filename(&self) -> &str;
    fn xml_filename(&self) -> &str;
    fn escape_xml(&self) -> bool;
}
